use std::env::args_os;
use std::process::ExitCode;

use pnmtool::{process_ppm_image, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match process_ppm_image(&arguments) {
        Ok(_) => {
            println!("Conversion successful");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
