use myblock_stage::{ProgramExecutor, StageConfig};
use std::path::Path;

const DEFAULT_CONFIG_FILE_NAME: &str = "stage.toml";

const SAMPLE_PROGRAM: &str = "\
# walk a square and greet
repeat 4
  move 12
  turn 90
end
say Hello, MyBlock!
";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if matches!(args.get(1).map(|s| s.as_str()), Some("--help") | Some("-h")) {
        println!("Usage: stage_demo [program-file]");
        println!("Runs the given program file, or a built-in sample if omitted.");
        println!("Reads {DEFAULT_CONFIG_FILE_NAME} from the working directory when present.");
        return;
    }

    let source = if let Some(path) = args.get(1) {
        match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("read program failed ({path}): {err}");
                std::process::exit(1);
            }
        }
    } else {
        SAMPLE_PROGRAM.to_string()
    };

    let config = if Path::new(DEFAULT_CONFIG_FILE_NAME).exists() {
        match StageConfig::from_config_file(DEFAULT_CONFIG_FILE_NAME) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    } else {
        StageConfig::default()
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("build tokio runtime");

    let executor = ProgramExecutor::with_config(config);
    match runtime.block_on(executor.run_source(&source)) {
        Ok(report) => {
            println!("{}", report.log);
            println!("trail points: {}", report.snapshot.trail.len());
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
