use crate::image::ops::Operation;
use crate::image::writer::pnm::OutputEncoding;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_basename_argument(command);
        let command = Self::register_output_encoding_argument(command);
        Self::register_operation_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_basename_argument(command: Command) -> Command {
        command.arg(Self::create_output_basename_argument())
    }

    fn register_output_encoding_argument(command: Command) -> Command {
        command.arg(Self::create_output_encoding_argument())
    }

    fn register_operation_argument(command: Command) -> Command {
        command.arg(Self::create_operation_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_basename_argument() -> Arg {
        Arg::new("output_basename")
            .help("Output path without extension, .ppm or .pgm is appended")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_encoding_argument() -> Arg {
        arg!(output_encoding: -e --encoding <ENCODING> "Encoding of the output image")
            .required(true)
            .value_parser(value_parser!(OutputEncoding))
    }

    fn create_operation_argument() -> Arg {
        arg!(operation: -o --operation <OPERATION> "Transformation applied to the image before writing")
            .required(false)
            .value_parser(value_parser!(Operation))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_basename: Self::extract_output_basename_argument(matches),
            output_encoding: Self::extract_output_encoding_argument(matches),
            operation: Self::extract_operation_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_basename_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_basename")
            .expect("Required argument output_basename not provided")
            .clone()
    }

    fn extract_output_encoding_argument(matches: &ArgMatches) -> OutputEncoding {
        matches
            .get_one::<OutputEncoding>("output_encoding")
            .expect("Output encoding must be provided, but was unset.")
            .to_owned()
    }

    fn extract_operation_argument(matches: &ArgMatches) -> Option<Operation> {
        matches.get_one::<Operation>("operation").copied()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
