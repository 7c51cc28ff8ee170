use std::env;
use std::path::PathBuf;
use tuturl_lexer::config::RuntimeConfig;
use tuturl_lexer::{logging, pipeline};

/// Source read when no file is named on the command line
const DEFAULT_SOURCE_PATH: &str = "./app/code.tuturl";

#[derive(Debug, PartialEq)]
struct CliOptions {
    file: PathBuf,
    json: bool,
    config: Option<PathBuf>,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("tuturl");

    let options = match parse_args(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [FILE] [--json] [--config PATH]", program);
            std::process::exit(2);
        }
    };

    if options.help {
        print_help(program);
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("error[{}]: {}", error.error_code(), error);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    match pipeline::process_file_with_config(&options.file, &config) {
        Ok(result) => {
            if options.json {
                println!("{}", pipeline::PipelineOutput::new(&result).to_json()?);
            } else {
                for token in &result.tokens {
                    println!("{}", token);
                }
            }
        }
        Err(error) => {
            eprintln!("\nFAILED ({}): {}", error.stage(), error);
            if logging::config::use_cargo_style_output() {
                if let Some(summary) = logging::format_cargo_style_summary() {
                    eprint!("{}", summary);
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        file: PathBuf::from(DEFAULT_SOURCE_PATH),
        json: false,
        config: None,
        help: false,
    };
    let mut file_seen = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                options.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            file => {
                if file_seen {
                    return Err(format!("Unexpected argument '{}'", file));
                }
                options.file = PathBuf::from(file);
                file_seen = true;
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_help(program_name: &str) {
    println!("tuturl lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes a tuturl source file and checks token adjacency rules");
    println!();
    println!("USAGE:");
    println!("    {} [FILE] [OPTIONS]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    [FILE]    Source file (default: {})", DEFAULT_SOURCE_PATH);
    println!();
    println!("OPTIONS:");
    println!("    --json           Print the token stream and metrics as JSON");
    println!("    --config PATH    Read preferences from a TOML file");
    println!("    --help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    TUTURL_LEXICAL_KNOWN_FUNCTIONS    Comma-separated function names");
    println!("    TUTURL_LOGGING_MIN_LEVEL          error, warning, info or debug");
    println!("    DEBUG=true                        Trace every step");
    println!();
    println!("EXIT STATUS:");
    println!("    0 on success, 1 when reading or tokenization failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.file, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert!(!options.json);
        assert!(options.config.is_none());
    }

    #[test]
    fn test_all_options() {
        let options = parse_args(&args(&["main.tuturl", "--json", "--config", "tuturl.toml"])).unwrap();
        assert_eq!(options.file, PathBuf::from("main.tuturl"));
        assert!(options.json);
        assert_eq!(options.config, Some(PathBuf::from("tuturl.toml")));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["--threads"])).is_err());
        assert!(parse_args(&args(&["a.tuturl", "b.tuturl"])).is_err());
    }
}
