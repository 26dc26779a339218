use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use asm1802::{listing, Assembler};
use color_print::cformat;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Source file (.asm is appended when the name has no extension)
    input: String,

    /// Write the object image to this file
    #[clap(short, long)]
    output: Option<String>,

    /// Suppress the listing (diagnostics still print)
    #[clap(short, long)]
    quiet: bool,
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    println!("ASM1802 v{}", env!("CARGO_PKG_VERSION"));

    let path = if Path::new(&args.input).extension().is_some() {
        args.input.clone()
    } else {
        format!("{}.asm", args.input)
    };

    let file = File::open(&path).expect(&cformat!("<red,bold>Cannot open file</>: {}", path));
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .map(|line| line.expect("Failed to read line"))
        .collect();

    let mut asm = Assembler::new(lines);
    let result = asm.run();

    if args.quiet {
        listing::print_diagnostics(&result);
    } else {
        listing::print_listing(&result);
    }
    listing::print_summary(&result);
    listing::print_symbols(asm.symbols());

    if let Some(out) = &args.output {
        let image: Vec<u8> = result
            .records
            .iter()
            .flat_map(|rec| rec.bytes.iter().copied())
            .collect();
        std::fs::write(out, &image)
            .expect(&cformat!("<red,bold>Cannot write file</>: {}", out));
    }

    if result.errors > 0 {
        std::process::exit(1);
    }
}
