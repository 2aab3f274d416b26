use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use canopy::{random_tree, AvlTree, GrowthConfig};

#[derive(Parser, Debug)]
#[command(name = "canopy", about = "Balanced ordered multiset inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grow a random tree and print its traversals.
    Demo {
        /// Grow until the tree reaches this height.
        #[arg(long, default_value_t = 5)]
        target_height: u32,
        /// RNG seed; omit for an entropy seed.
        #[arg(long)]
        seed: Option<u64>,
        /// Emit the tree as a Graphviz digraph instead of traversal lists.
        #[arg(long)]
        dot: bool,
    },
    /// Execute a line-oriented op script against one tree, auditing after
    /// every mutation.
    Run {
        /// Script file: one of `insert N`, `delete N`, `count N`, `split N`,
        /// `height`, `validate` per line; `#` starts a comment.
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            target_height,
            seed,
            dot,
        } => run_demo(target_height, seed, dot)?,
        Commands::Run { script } => run_script(script)?,
    }

    Ok(())
}

fn run_demo(target_height: u32, seed: Option<u64>, dot: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = GrowthConfig::to_height(target_height);
    let tree = random_tree(&config, &mut rng)
        .with_context(|| format!("failed to grow a tree of height {target_height}"))?;

    if dot {
        print!("{}", render_dot(&tree));
        return Ok(());
    }

    println!("height={} keys={}", tree.height(), tree.len());
    println!("preorder:  {:?}", keys(tree.preorder()));
    println!("inorder:   {:?}", keys(tree.inorder()));
    println!("postorder: {:?}", keys(tree.postorder()));
    tree.audit().context("generated tree failed its audit")?;
    Ok(())
}

fn keys<'a>(views: impl Iterator<Item = canopy::NodeView<'a, i64>>) -> Vec<i64> {
    views.map(|view| *view.key).collect()
}

fn run_script(path: PathBuf) -> Result<()> {
    let reader = BufReader::new(
        File::open(&path).with_context(|| format!("failed to open script {}", path.display()))?,
    );

    let mut tree: AvlTree<i64> = AvlTree::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        apply_line(&mut tree, line).with_context(|| format!("script line {}", idx + 1))?;
    }

    println!("final height={} keys={}", tree.height(), tree.len());
    println!("inorder: {:?}", keys(tree.inorder()));
    Ok(())
}

fn apply_line(tree: &mut AvlTree<i64>, line: &str) -> Result<()> {
    let mut parts = line.split_whitespace();
    let op = parts.next().context("empty op line")?;
    let arg = parts.next();

    let parse = |arg: Option<&str>| -> Result<i64> {
        let raw = arg.with_context(|| format!("`{op}` needs a key argument"))?;
        raw.parse()
            .with_context(|| format!("`{raw}` is not a valid key"))
    };

    match op {
        "insert" => {
            tree.insert(parse(arg)?);
            tree.audit()?;
        }
        "delete" => {
            let key = parse(arg)?;
            let removed = tree.delete(&key);
            tree.audit()?;
            if !removed {
                println!("delete {key}: absent, no-op");
            }
        }
        "count" => {
            let key = parse(arg)?;
            println!("count {key} = {}", tree.count_equal(&key));
        }
        "split" => {
            let pivot = parse(arg)?;
            let (below, at_or_above) = std::mem::take(tree).split(&pivot);
            println!("split {pivot}: below {:?}", keys(below.inorder()));
            println!("split {pivot}: at-or-above {:?}", keys(at_or_above.inorder()));
            // Put the halves back together so the script can continue.
            *tree = AvlTree::merge(&below, &at_or_above);
            tree.audit()?;
        }
        "height" => println!("height = {}", tree.height()),
        "validate" => println!("validate = {}", tree.validate()),
        other => bail!("unknown op `{other}`"),
    }

    Ok(())
}

/// Render the tree as a Graphviz digraph of identity edges, nodes labeled
/// with their keys.
fn render_dot(tree: &AvlTree<i64>) -> String {
    let mut out = String::from("digraph avl {\n  node [shape=circle];\n");
    for record in tree.snapshot() {
        out.push_str(&format!(
            "  n{} [label=\"{}\"];\n",
            record.identity, record.key
        ));
        for child in [record.left, record.right].into_iter().flatten() {
            out.push_str(&format!("  n{} -> n{};\n", record.identity, child));
        }
    }
    out.push_str("}\n");
    out
}
