//! Command line entry point.
//! Induces a decision tree for the given target column of a CSV file
//! with both criteria, prints the classification rules,
//! and writes a Graphviz dot description per criterion.
use std::env;
use std::process::ExitCode;

use colored::Colorize;

use arbor::prelude::*;


fn boxprint(text: &str) {
    let width = text.chars().count() + 2;
    println!("┌{}┐", "─".repeat(width));
    println!("│ {text} │");
    println!("└{}┘", "─".repeat(width));
}


fn run(sample: &Sample, criterion: Criterion, dot_file: &str)
    -> Result<(), TreeError>
{
    let target = sample.target_name();

    boxprint(&format!("Decision tree using {criterion} for {target}"));
    let mut trace = ConsoleTrace::new();
    let tree = TreeBuilder::new()
        .criterion(criterion)
        .trace(&mut trace)
        .build(sample)?;

    tree.to_dot_file(&sample.target_domain(), dot_file)?;
    boxprint(&format!("Tree saved as '{dot_file}'."));

    boxprint(&format!(
        "Classification rules using {criterion} for {target}:"
    ));
    for rule in tree.rules(target) {
        println!("  {rule}");
    }

    Ok(())
}


fn main() -> ExitCode {
    let args = env::args().collect::<Vec<_>>();
    if args.len() != 3 {
        eprintln!("Usage: arbor <target-column> <input.csv>");
        return ExitCode::FAILURE;
    }
    let target = &args[1];
    let input = &args[2];

    let sample = SampleReader::new()
        .file(input)
        .has_header(true)
        .target_feature(target)
        .read();
    let sample = match sample {
        Ok(sample) => sample,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            return ExitCode::FAILURE;
        },
    };

    let runs = [
        (Criterion::InformationGain, "id3_tree.dot"),
        (Criterion::Gini, "gini_tree.dot"),
    ];
    for (criterion, dot_file) in runs {
        if let Err(e) = run(&sample, criterion, dot_file) {
            eprintln!("{} {e}", "Error:".red().bold());
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
