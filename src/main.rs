use std::path::PathBuf;

use clap::Parser;
use cursor_fdw::bridge::MemoryBridge;
use cursor_fdw::catalog::{ColumnDef, ForeignCatalog};
use cursor_fdw::datum::{Type, Value};
use cursor_fdw::executor::{ForeignScanNode, explain_foreign_scan, plan_foreign_scan};
use cursor_fdw::fdw::CursorFdw;
use cursor_fdw::options::{DefElem, SCHEMA_NAME, TABLE_NAME};
use cursor_fdw::planner::StandardEstimates;
use cursor_fdw::scan::ExecFlags;
use cursor_fdw::settings::Settings;
use tracing_subscriber::EnvFilter;

/// Scan a relation through the cursor-backed foreign data wrapper.
#[derive(Parser, Debug)]
#[command(name = "cursor-fdw", version, about)]
struct Args {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Remote schema the foreign table points at
    #[arg(long, default_value = "public")]
    schema: String,

    /// Remote table the foreign table points at
    #[arg(long, default_value = "items")]
    table: String,

    /// Print the plan instead of running the scan
    #[arg(long)]
    explain: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let columns = vec![
        ColumnDef::new("id", Type::Int4),
        ColumnDef::new("name", Type::Text),
        ColumnDef::new("price", Type::Float8),
    ];

    // Remote side: one demo relation
    let bridge = MemoryBridge::new();
    bridge.create_relation("public", "items", columns.clone());
    bridge.insert_rows(
        "public",
        "items",
        vec![
            vec![Value::Int32(1), Value::Text("apple".into()), Value::Float64(1.25)],
            vec![Value::Int32(2), Value::Text("bread".into()), Value::Float64(3.5)],
            vec![Value::Int32(3), Value::Null, Value::Float64(0.75)],
        ],
    )?;

    // Local side: a foreign table pointing at --schema/--table
    let mut catalog = ForeignCatalog::new();
    catalog.create_server("loopback", vec![])?;
    let relid = catalog.create_foreign_table(
        "items",
        "loopback",
        columns,
        vec![
            DefElem::new(SCHEMA_NAME, &args.schema),
            DefElem::new(TABLE_NAME, &args.table),
        ],
    )?;
    let table = catalog.foreign_table(relid)?;

    let fdw = CursorFdw::new(&bridge, settings);
    let plan = plan_foreign_scan(&catalog, &fdw, relid, Vec::new(), &StandardEstimates)?;

    if args.explain {
        let _node = ForeignScanNode::begin(&fdw, plan.clone(), ExecFlags::EXPLAIN_ONLY, 0)?;
        print!("{}", explain_foreign_scan(&fdw, table, &plan));
        return Ok(());
    }

    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    println!("{}", names.join(" | "));

    let mut node = ForeignScanNode::begin(&fdw, plan, ExecFlags::NONE, table.columns.len())?;
    let mut count = 0;
    while let Some(row) = node.next()? {
        let values: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", values.join(" | "));
        count += 1;
    }
    node.end()?;
    println!("({count} rows)");

    Ok(())
}
