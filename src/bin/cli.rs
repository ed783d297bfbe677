use clap::Parser;
use colored::Colorize;
use itertools::Itertools;
use std::process;
use tracing_subscriber::EnvFilter;
use xyz_expr::{Formula, Notation, Variable};

#[derive(Parser)]
#[command(name = "xyz-expr")]
#[command(about = "Parse, print, evaluate and differentiate x/y/z expressions")]
#[command(version)]
struct Args {
    /// Expression to parse, e.g. "(+ (* x y) 2)" or "x y * 2 +"
    expression: String,

    /// Notation of the expression: prefix or postfix
    #[arg(short, long, default_value_t = Notation::Prefix)]
    notation: Notation,

    /// Point to evaluate at, as x,y,z
    #[arg(short, long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
    at: Option<Vec<f64>>,

    /// Differentiate with respect to this variable; repeat for higher orders
    #[arg(short, long)]
    diff: Vec<Variable>,

    /// Print the gradient at the evaluation point
    #[arg(long, requires = "at")]
    gradient: bool,

    /// Print the Hessian at the evaluation point
    #[arg(long, requires = "at")]
    hessian: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let formula = Formula::parse(args.expression.as_str(), args.notation)?;
    let expr = formula.derive_wrt(&args.diff);

    let mut lines = Vec::new();
    if !args.diff.is_empty() {
        lines.push(format!(
            "{}: d/d{}",
            "Derivative".cyan(),
            args.diff.iter().join(" d/d")
        ));
    }
    lines.push(format!("{}: {}", "Postfix".cyan(), expr));
    lines.push(format!("{}: {}", "Prefix".cyan(), expr.prefix()));

    if let Some(at) = &args.at {
        let point: [f64; 3] = at.as_slice().try_into()?;
        lines.push(format!("{}: {}", "Value".cyan(), expr.evaluate_at(point)));
        if args.gradient {
            lines.push(format!(
                "{}: [{}]",
                "Gradient".cyan(),
                formula.gradient(point).iter().join(", ")
            ));
        }
        if args.hessian {
            let rows = formula
                .hessian(point)
                .iter()
                .map(|row| format!("[{}]", row.iter().join(", ")))
                .join(", ");
            lines.push(format!("{}: [{}]", "Hessian".cyan(), rows));
        }
    }

    Ok(lines.join("\n"))
}
