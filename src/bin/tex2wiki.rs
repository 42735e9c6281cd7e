//! Command-line interface for tex2wiki
//! This binary converts LaTeX lecture notes into MediaWiki markup, one
//! output file per top-level section.
//!
//! Usage:
//!   tex2wiki convert `<path>` [--out `<dir>`]  - Convert a document to wiki files
//!   tex2wiki ast `<path>`                    - Dump the parsed tree as JSON

use clap::{Arg, Command};
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("tex2wiki")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting LaTeX lecture notes to MediaWiki markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Convert a document, one file per section")
                .arg(
                    Arg::new("path")
                        .help("Path to the LaTeX source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Output directory")
                        .default_value("output"),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Wiki page prefix used for reference links")
                        .default_value(":MB102"),
                ),
        )
        .subcommand(
            Command::new("ast")
                .about("Print the parsed document tree as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the LaTeX source file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let path = convert_matches
                .get_one::<String>("path")
                .expect("required argument");
            let out = convert_matches
                .get_one::<String>("out")
                .expect("defaulted argument");
            let page = convert_matches
                .get_one::<String>("page")
                .expect("defaulted argument");
            handle_convert_command(path, out, page);
        }
        Some(("ast", ast_matches)) => {
            let path = ast_matches
                .get_one::<String>("path")
                .expect("required argument");
            handle_ast_command(path);
        }
        _ => unreachable!(),
    }
}

fn handle_convert_command(path: &str, out: &str, page: &str) {
    let document = parse_file(path);

    let serializer = tex2wiki::mediawiki::Serializer::new().with_page_prefix(page);
    let sections = match serializer.convert(&document) {
        Ok(sections) => sections,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    let out_dir = PathBuf::from(out);
    if let Err(error) = fs::create_dir_all(&out_dir) {
        eprintln!("Error: cannot create {}: {}", out_dir.display(), error);
        std::process::exit(1);
    }

    for (index, section) in sections.iter().enumerate() {
        let filename = format!("{}. {}.txt", index + 1, sanitize_filename(&section.name));
        let target = out_dir.join(filename);
        if let Err(error) = fs::write(&target, &section.content) {
            eprintln!("Error: cannot write {}: {}", target.display(), error);
            std::process::exit(1);
        }
        println!("{}", target.display());
    }
}

fn handle_ast_command(path: &str) {
    let document = parse_file(path);
    match serde_json::to_string_pretty(&document) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    }
}

fn parse_file(path: &str) -> tex2wiki::latex::Document {
    let source = match fs::read_to_string(Path::new(path)) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: cannot read {}: {}", path, error);
            std::process::exit(1);
        }
    };
    match tex2wiki::latex::parse(&source) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    }
}

fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\'], "-")
}
