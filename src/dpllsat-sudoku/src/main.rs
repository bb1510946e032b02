//! Sudoku solver and generator on top of the DPLL engine.
//!
//! `solve` reads grids (one per line, 81 characters) and prints their
//! solution; `generate` builds puzzles with a unique solution.

// benchmarks from https://github.com/attractivechaos/plb/tree/ca35a7dfb2a235fa00fce58f7d1d426d69c6123a/sudoku/incoming

#[macro_use]
extern crate log;

mod generate;
mod grid;
mod parse;

use {
    crate::{
        generate::{Generator, Puzzle, MIN_GIVENS},
        grid::Grid,
    },
    clap::{App, Arg, ArgMatches, SubCommand},
    std::{sync::mpsc, time::Instant},
    threadpool::ThreadPool,
};

/// Result type.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("dpllsat-sudoku")
        .version("0.1.0")
        .about("Solve and generate sudoku puzzles with a DPLL SAT solver")
        .subcommand(
            SubCommand::with_name("solve")
                .about("Solve the grids of each file")
                .arg(Arg::with_name("files").multiple(true).required(true)),
        )
        .subcommand(
            SubCommand::with_name("generate")
                .about("Generate puzzles with a unique solution")
                .arg(
                    Arg::with_name("givens")
                        .long("givens")
                        .help("Number of given cells, from 17 to 81")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("count")
                        .long("count")
                        .default_value("1")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .help("Seed of the first puzzle; puzzle i uses seed+i")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("jobs")
                        .short("j")
                        .long("jobs")
                        .default_value("1")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("solve", Some(m)) => solve_files(m),
        ("generate", Some(m)) => generate(m),
        _ => Err("expected a subcommand: solve or generate (see --help)".into()),
    }
}

fn seconds(start: Instant) -> f64 {
    let dur = start.elapsed();
    dur.as_secs() as f64 + dur.subsec_millis() as f64 * 1e-3
}

fn solve_files(m: &ArgMatches) -> Result<()> {
    let sep: String = "=".chars().cycle().take(70).collect();

    for file in m.values_of("files").into_iter().flatten() {
        info!("process sudoku file {:?}", file);

        let mut now = Instant::now();
        let grids = parse::parse(std::fs::File::open(file)?)?;
        let n = grids.len();

        println!("parsed {} grid(s)", n);
        info!("parsed {} grid(s) (in {:.3}s)", n, seconds(now));
        now = Instant::now();

        for grid in grids {
            println!("{}\nsolve grid\n{}", sep, grid.render());

            let mut digits = grid.to_digits();
            if !dpllsat::sudoku::solve(&mut digits)? {
                println!("grid can't be solved");
                continue;
            }
            let sol = Grid::from_digits(&digits);
            println!("solution:\n{}", sol.render());

            if !sol.full() {
                return Err("solution not completed".into());
            } else if !sol.is_correct() {
                return Err("solution not correct".into());
            } else if !grid.extends_to(&sol) {
                return Err("solution does not extend the grid".into());
            }
        }

        info!("solved {} grid(s) (in {:.3}s)", n, seconds(now));
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(m: &ArgMatches, name: &str) -> Result<Option<T>> {
    match m.value_of(name) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| format!("invalid value {:?} for --{}", s, name).into()),
    }
}

fn generate(m: &ArgMatches) -> Result<()> {
    let givens: usize = parse_arg(m, "givens")?.unwrap_or(MIN_GIVENS);
    let count: usize = parse_arg(m, "count")?.unwrap_or(1);
    let seed: Option<u64> = parse_arg(m, "seed")?;
    let jobs: usize = parse_arg(m, "jobs")?.unwrap_or(1).max(1);
    if givens < MIN_GIVENS || givens > 81 {
        return Err(format!("--givens must be in {}..=81", MIN_GIVENS).into());
    }

    let now = Instant::now();
    let pool = ThreadPool::new(jobs);
    let (tx, rx) = mpsc::channel();
    for i in 0..count {
        let tx = tx.clone();
        pool.execute(move || {
            let mut gen = Generator::new(seed.map(|s| s.wrapping_add(i as u64)));
            let res = gen.generate(givens).map_err(|e| e.to_string());
            let _ = tx.send((i, res));
        });
    }
    drop(tx);

    let puzzles = collect_puzzles(count, rx.iter())?;
    info!("generated {} puzzle(s) (in {:.3}s)", puzzles.len(), seconds(now));

    for (i, Puzzle { puzzle, solution }) in puzzles.into_iter().enumerate() {
        println!("puzzle {} ({} givens)", i + 1, puzzle.num_givens());
        println!("{}", puzzle.to_line());
        println!("{}", solution.to_line());
        println!("{}", puzzle.render());
        println!("{}", solution.render());
    }
    Ok(())
}

/// Put the results of the `count` generation jobs back in order.
///
/// Fails on the first job error, or if a job never sent its result.
fn collect_puzzles<I>(count: usize, results: I) -> Result<Vec<Puzzle>>
where
    I: IntoIterator<Item = (usize, std::result::Result<Puzzle, String>)>,
{
    let mut slots: Vec<Option<Puzzle>> = (0..count).map(|_| None).collect();
    for (i, res) in results {
        slots[i] = Some(res?);
    }
    let done = slots.iter().filter(|p| p.is_some()).count();
    if done != count {
        return Err(format!("only {} of {} puzzle(s) were generated", done, count).into());
    }
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod test {
    use super::*;

    fn puzzle(seed: u64) -> Puzzle {
        let solution = Generator::new(Some(seed)).full_grid().unwrap();
        Puzzle { puzzle: solution.clone(), solution }
    }

    #[test]
    fn test_collect_in_order() {
        let (p0, p1) = (puzzle(1), puzzle(2));
        let results = vec![(1, Ok(p1.clone())), (0, Ok(p0.clone()))];
        let puzzles = collect_puzzles(2, results).unwrap();
        assert_eq!(puzzles[0].solution, p0.solution);
        assert_eq!(puzzles[1].solution, p1.solution);
    }

    #[test]
    fn test_collect_missing_job() {
        let results = vec![(0, Ok(puzzle(1)))];
        assert!(collect_puzzles(2, results).is_err());
    }

    #[test]
    fn test_collect_job_error() {
        let results = vec![(0, Ok(puzzle(1))), (1, Err("bad".to_string()))];
        let err = collect_puzzles(2, results).unwrap_err();
        assert_eq!(err.to_string(), "bad");
    }
}
