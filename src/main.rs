use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use perseg::{
    algebra::{Max, Min, Monoid, Sum},
    PersistentSegmentTree, TreeConfig, VersionPolicy, VersionSelection,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "perseg", about = "Versioned range queries over a persistent segment tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one of the built-in demonstrations.
    Demo {
        /// Which demonstration to run.
        #[arg(value_enum)]
        which: Demo,
    },
    /// Build a tree and execute a command script against it.
    Script {
        /// Script file (`query <v> <l> <r>`, `current <l> <r>`, `update <i> <x>`, `select <v>`).
        script: PathBuf,
        /// Aggregation operation.
        #[arg(long, value_enum, default_value_t = Op::Sum)]
        op: Op,
        /// Initial values, comma separated.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        values: Vec<i64>,
        /// Clamp out-of-range version selections to the latest version instead of failing.
        #[arg(long)]
        clamp: bool,
        /// Print the allocation profile after the script finishes.
        #[arg(long)]
        profile: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Demo {
    /// Range minimum over [2, 5, 1, 4, 9, 3].
    Min,
    /// Range sum over [0, 1, 3, 5, -2, 3].
    Sum,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Op {
    Sum,
    Min,
    Max,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { which } => run_demo(which)?,
        Commands::Script {
            script,
            op,
            values,
            clamp,
            profile,
        } => {
            let config = TreeConfig::default()
                .with_version_policy(if clamp {
                    VersionPolicy::ClampToLatest
                } else {
                    VersionPolicy::Reject
                })
                .with_allocation_profiling(profile);
            match op {
                Op::Sum => run_script(&script, &values, Sum::new(), config)?,
                Op::Min => run_script(&script, &values, Min::new(), config)?,
                Op::Max => run_script(&script, &values, Max::new(), config)?,
            }
        }
    }

    Ok(())
}

fn run_demo(which: Demo) -> Result<()> {
    match which {
        Demo::Min => {
            let mut tree = PersistentSegmentTree::new(&[2, 5, 1, 4, 9, 3], Min::<i32>::new())
                .context("failed to build min tree")?;
            print_queries(&tree, &[(0, 1), (3, 5), (0, 5)])?;

            println!("Updating values...");
            for (index, value) in [(1, -3), (4, -1), (5, -11)] {
                tree.update(index, value)?;
            }
            print_queries(&tree, &[(0, 1), (3, 4), (0, 5)])?;
            println!("version 0, 0..=5: {}", tree.query(0, 0, 5)?);
        }
        Demo::Sum => {
            let mut tree = PersistentSegmentTree::new(&[0, 1, 3, 5, -2, 3], Sum::<i32>::new())
                .context("failed to build sum tree")?;
            print_queries(&tree, &[(0, 2), (3, 4), (0, 5)])?;

            println!("Updating values...");
            for (index, value) in [(2, 7), (4, -5), (0, 12)] {
                tree.update(index, value)?;
            }
            print_queries(&tree, &[(0, 2), (3, 4), (0, 5)])?;
            println!("version 0, 0..=5: {}", tree.query(0, 0, 5)?);
        }
    }

    Ok(())
}

fn print_queries<M>(tree: &PersistentSegmentTree<M>, ranges: &[(usize, usize)]) -> Result<()>
where
    M: Monoid,
    M::Value: std::fmt::Display,
{
    let version = tree.current_version();
    for &(left, right) in ranges {
        println!(
            "version {}, {}..={}: {}",
            version,
            left,
            right,
            tree.query_current(left, right)?
        );
    }
    Ok(())
}

fn run_script<M>(script: &PathBuf, values: &[i64], monoid: M, config: TreeConfig) -> Result<()>
where
    M: Monoid<Value = i64>,
{
    let mut tree = PersistentSegmentTree::with_config(values, monoid, config)
        .context("failed to build tree")?;

    let reader = BufReader::new(
        File::open(script)
            .with_context(|| format!("failed to open script {}", script.display()))?,
    );

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        execute_line(&mut tree, line)
            .with_context(|| format!("script line {}: '{}'", line_no + 1, line))?;
    }

    if let Some(profile) = tree.allocation_profile() {
        println!("{}", profile.report());
    }

    Ok(())
}

fn execute_line<M>(tree: &mut PersistentSegmentTree<M>, line: &str) -> Result<()>
where
    M: Monoid<Value = i64>,
{
    let mut fields = line.split_whitespace();
    let command = fields
        .next()
        .ok_or_else(|| anyhow!("empty command"))?;
    let args = fields.collect::<Vec<_>>();

    match (command, args.as_slice()) {
        ("query", [version, left, right]) => {
            let (version, left, right) = (parse(version)?, parse(left)?, parse(right)?);
            println!(
                "version {}, {}..={}: {}",
                version,
                left,
                right,
                tree.query(version, left, right)?
            );
        }
        ("current", [left, right]) => {
            let (left, right) = (parse(left)?, parse(right)?);
            println!(
                "version {}, {}..={}: {}",
                tree.current_version(),
                left,
                right,
                tree.query_current(left, right)?
            );
        }
        ("update", [index, value]) => {
            let index = parse(index)?;
            let value: i64 = value
                .parse()
                .with_context(|| format!("invalid value '{}'", value))?;
            let version = tree.update(index, value)?;
            println!("version {}: [{}] = {}", version, index, value);
        }
        ("select", [version]) => match tree.select_version(parse(version)?)? {
            VersionSelection::Exact(version) => println!("selected version {}", version),
            VersionSelection::Clamped {
                requested,
                selected,
            } => println!(
                "version {} does not exist, selected latest version {}",
                requested, selected
            ),
        },
        (other, _) => bail!("unknown command or wrong arity: {}", other),
    }

    Ok(())
}

fn parse(field: &str) -> Result<usize> {
    field
        .parse()
        .with_context(|| format!("invalid index '{}'", field))
}
