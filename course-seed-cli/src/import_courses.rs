use clap::{value_parser, Arg, ArgAction, Command};
use course_seed_core::{Context, Import, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = Command::new("import_courses")
        .version("0.1.0")
        .about("Generate schema.sql and seed.sql from the registrar course export")
        .author("SMU Course Review Team")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Registrar export (.xls, .xlsx, .ods or .csv), default data/exportResult.xls")
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory for schema.sql and seed.sql, default db/")
        )
        .arg(
            Arg::new("seed-only")
                .long("seed-only")
                .action(ArgAction::SetTrue)
                .help("Only write seed.sql, leave schema.sql untouched")
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .value_name("YAML")
                .help("Column layout override")
        )
        .arg(
            Arg::new("sheet")
                .long("sheet")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Zero based worksheet index, default 0")
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the import summary as JSON on stdout")
        )
        .get_matches();

    // Initialize context from environment, command line wins
    let mut ctx = Context::from_env()?;

    if let Some(input) = matches.get_one::<String>("input") {
        ctx.input = input.clone();
    }
    if let Some(output_dir) = matches.get_one::<String>("output-dir") {
        ctx.output_dir = output_dir.clone();
    }
    if let Some(columns) = matches.get_one::<String>("columns") {
        ctx.columns_yaml = columns.clone();
    }
    if let Some(sheet) = matches.get_one::<usize>("sheet") {
        ctx.sheet_index = *sheet;
    }
    if matches.get_flag("seed-only") {
        ctx.seed_only = true;
    }

    // Initialize tracing on stderr so stdout carries only the --json summary,
    // RUST_LOG overrides the context debug level
    let default_level = if ctx.debug > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if ctx.ctx_out {
        info!("Context: {:?}", ctx);
    }

    info!("Reading: {}", ctx.input);
    let import = match Import::load(&ctx) {
        Ok(import) => import,
        Err(err) => {
            error!("Failed to import '{}': {}", ctx.input, err);
            return Err(err);
        }
    };

    let summary = import.summary();
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.log();
    }

    let written = import.write(&ctx).await?;

    info!("Next step, import into D1:");
    for path in &written {
        info!("  npx wrangler d1 execute {} --file={} --remote", ctx.db_name, path.display());
    }
    info!("For local development use --local instead of --remote");

    Ok(())
}
