use clap::Parser;
use ordered_tree::{Result, Tree};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tree-demo")]
#[command(about = "Builds an ordered tree from the given keys and reports on it")]
struct Args {
    /// Keys to insert, in order.
    #[arg(allow_negative_numbers = true, env = "TREE_DEMO_KEYS", value_delimiter = ',')]
    keys: Vec<i64>,

    /// Also report the range of the subtree rooted at the first node holding this key.
    #[arg(long, allow_negative_numbers = true)]
    subtree: Option<i64>,

    /// Answer queries with the recursive variants instead of the looping ones.
    #[arg(long)]
    recursive: bool,

    /// Print the tree on its side.
    #[arg(long)]
    print: bool,

    /// Log filter directives, e.g. `ordered_tree=trace`.
    #[arg(long, env = "TREE_DEMO_LOG", default_value = "warn")]
    log: String,
}

fn setup_logging(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter {:?}: {}", directives, e);
        EnvFilter::new("warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .unwrap_or_else(|e| eprintln!("Error: Failed to set up logging: {}", e));
}

fn run(args: &Args) -> Result<()> {
    let mut tree = Tree::new();
    for key in &args.keys {
        if args.recursive {
            tree.insert_recursive(*key);
        } else {
            tree.insert(*key);
        }
    }
    info!(len = tree.len(), height = tree.height(), "built tree");

    let (min, max) = if args.recursive {
        (tree.min_recursive(), tree.max_recursive())
    } else {
        (tree.min(), tree.max())
    };

    println!("empty:  {}", tree.is_empty());
    println!("nodes:  {}", tree.len());
    println!("height: {}", tree.height());
    println!("min:    {}", display_or_absent(min));
    println!("max:    {}", display_or_absent(max));
    println!("range:  {}", display_or_absent(tree.range()?.as_ref()));

    if let Some(key) = args.subtree {
        let start = tree.find(&key);
        debug!(key, found = start.is_some(), "looked up subtree root");
        println!(
            "range of subtree at {}: {}",
            key,
            display_or_absent(tree.range_from(start)?.as_ref())
        );
    }

    if args.print {
        tree.print();
    }

    Ok(())
}

fn display_or_absent(value: Option<&i64>) -> String {
    value.map_or_else(|| "absent".to_string(), i64::to_string)
}

fn main() {
    let args = Args::parse();
    setup_logging(&args.log);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
