//! Command-line front end: parse and inspect formulas, or generate random ones

use modalatlas::{
    generate_for_logic, parse, FormulaError, GeneratorConfig, Logic, LogicConfig, RngSource,
};
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!("\nCommands:");
    eprintln!("  parse <expression>     Parse a formula and print its measures");
    eprintln!("  generate               Print a random formula");
    eprintln!("\nOptions:");
    eprintln!("  --logic <name|file>    modal (default), propositional, or a JSON logic file");
    eprintln!("  --normalize            Canonicalize commutative operands (parse)");
    eprintln!("  --json                 Print the tree as JSON (parse)");
    eprintln!("  --height <n>           Target height (generate, default: 3)");
    eprintln!("  --modal-depth <n>      Maximum modal depth (generate, default: 2)");
    eprintln!("  --pruning <p>          Early termination probability (generate, default: 0.0)");
    eprintln!("  --seed <n>             Seed for reproducible output (generate)");
}

struct Options {
    logic: String,
    normalize: bool,
    json: bool,
    generator: GeneratorConfig,
    seed: Option<u64>,
    positional: Vec<String>,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse::<T>()
        .map_err(|_| format!("invalid value for {}: {}", flag, value))
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        logic: "modal".to_string(),
        normalize: false,
        json: false,
        generator: GeneratorConfig::default(),
        seed: None,
        positional: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--logic" => {
                options.logic = parse_value("--logic", args.get(i + 1))?;
                i += 1;
            }
            "--normalize" => options.normalize = true,
            "--json" => options.json = true,
            "--height" => {
                options.generator.height = parse_value("--height", args.get(i + 1))?;
                i += 1;
            }
            "--modal-depth" => {
                options.generator.max_modal_depth = parse_value("--modal-depth", args.get(i + 1))?;
                i += 1;
            }
            "--pruning" => {
                options.generator.pruning_factor = parse_value("--pruning", args.get(i + 1))?;
                i += 1;
            }
            "--seed" => {
                options.seed = Some(parse_value("--seed", args.get(i + 1))?);
                i += 1;
            }
            other if other.starts_with("--") => return Err(format!("unknown option: {}", other)),
            other => options.positional.push(other.to_string()),
        }
        i += 1;
    }
    Ok(options)
}

fn load_logic(name: &str) -> Result<Logic, FormulaError> {
    match name {
        "modal" => Ok(Logic::modal()),
        "propositional" => Ok(Logic::propositional()),
        path => {
            let content = fs::read_to_string(path).map_err(|e| {
                FormulaError::InvalidConfig(format!("failed to read {}: {}", path, e))
            })?;
            LogicConfig::from_json(&content)?.to_logic()
        }
    }
}

fn run_parse(options: &Options) -> Result<(), FormulaError> {
    let logic = load_logic(&options.logic)?;
    let expression = options.positional.join(" ");
    let mut formula = parse(&expression, &logic)?;
    if options.normalize {
        formula.normalize();
        formula.refresh_rendered();
    }

    if options.json {
        println!("{}", formula.to_json()?);
        return Ok(());
    }

    println!("Formula:     {}", formula.rendered());
    println!("Size:        {}", formula.size());
    println!("Height:      {}", formula.height());
    println!("Modal depth: {}", formula.modal_depth());
    println!("Subformulas:");
    for node in formula.subformulas(true) {
        println!("  {:3}  {}", node.size(), node.rendered());
    }
    Ok(())
}

fn run_generate(options: &Options) -> Result<(), FormulaError> {
    let logic = load_logic(&options.logic)?;
    let source = options.seed.map_or(RngSource::Entropy, RngSource::Seed);
    let mut rng = source.into_rng();
    let formula = generate_for_logic(&options.generator, &logic, &mut rng)?;
    println!("{}", formula.rendered());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let result = match args[1].as_str() {
        "parse" if !options.positional.is_empty() => run_parse(&options),
        "generate" => run_generate(&options),
        "-h" | "--help" => {
            print_usage(&args[0]);
            return;
        }
        _ => {
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(2);
    }
}
