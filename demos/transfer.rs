use clap::Parser;

use bdd_bridge::bdd::{Bdd, BddConfig};
use bdd_bridge::types::Var;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of variable pairs in `(x0 ∧ x_n) ∨ (x1 ∧ x_{n+1}) ∨ ...`.
    #[arg(value_name = "INT", default_value = "10")]
    n: u32,

    /// Enable dynamic reordering in the target manager, first firing at this many live nodes.
    #[clap(long, value_name = "INT")]
    reorder: Option<usize>,

    /// Maximum number of live nodes in the target manager.
    #[clap(long, value_name = "INT")]
    max_live: Option<usize>,

    /// Reverse the variables while transferring.
    #[clap(long)]
    reverse: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let n = args.n;
    let num_vars = 2 * n as usize;

    // The source keeps the identity order, under which the function is exponential.
    let source = Bdd::with_vars(num_vars);
    let mut f = source.zero();
    for i in 0..n {
        let a = source.mk_var(Var::new(i));
        let b = source.mk_var(Var::new(i + n));
        let t = source.apply_and(a, b)?;
        let next = source.apply_or(f, t)?;
        source.dereference(t);
        source.dereference(f);
        f = next;
    }
    println!("source = {:?}", source);
    println!("f = {}, size = {}", f, source.size(f));

    let mut config = BddConfig::default().with_initial_vars(num_vars);
    if let Some(threshold) = args.reorder {
        config = config.with_auto_reorder(threshold);
    }
    if let Some(max_live) = args.max_live {
        config = config.with_max_live(max_live);
    }
    let target = Bdd::new(config);

    if args.reorder.is_none() {
        // Interleave the pairs up front.
        let order: Vec<Var> = (0..n).flat_map(|i| [Var::new(i), Var::new(i + n)]).collect();
        target.reorder_to(&order);
    }

    let time_transfer = std::time::Instant::now();
    let g = if args.reverse {
        let renaming: Vec<Var> = (0..num_vars as u32).rev().map(Var::new).collect();
        source.transfer_rename(f, &target, &renaming)?
    } else {
        source.transfer_to(f, &target)?
    };
    println!("Transfer done in {:.3} s", time_transfer.elapsed().as_secs_f64());
    println!("target = {:?}", target);
    println!("g = {}, size = {}", g, target.size(g));
    println!("target order = {:?}", target.var_order());

    let count_f = source.sat_count(f, num_vars);
    let count_g = target.sat_count(g, num_vars);
    println!("sat_count: source = {}, target = {}", count_f, count_g);
    assert_eq!(count_f, count_g);

    // Swap the halves back and forth within the source.
    let permutation: Vec<Var> = (0..num_vars as u32).map(|i| Var::new((i + n) % (2 * n))).collect();
    let h = source.permute(f, &permutation)?;
    println!("permuted h = {}, size = {}, same function: {}", h, source.size(h), h == f);

    println!("\nTotal time: {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
