/*****************************************************************************************[main.rs]
Copyright (c) 2018-2018, Masaki Hara

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the "Software"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or
substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT
OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
**************************************************************************************************/

extern crate clap;
extern crate cpu_time;
extern crate dpllsat;
extern crate env_logger;
extern crate flate2;
#[macro_use]
extern crate log;
extern crate threadpool;

use clap::{App, Arg};
use dpllsat::{Heuristic, Report, Solver, SolverInterface, SolverOpts};
use flate2::bufread::GzDecoder;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::exit;
use std::sync::mpsc;
use threadpool::ThreadPool;

mod system;

/// What a worker sends back once it is done with one input file.
struct Outcome {
    /// Position of the file on the command line.
    index: usize,
    name: String,
    res: dpllsat::Result<Solved>,
}

struct Solved {
    heuristic: Heuristic,
    report: Report,
    num_vars: u32,
    num_clauses: u64,
    decisions: u64,
    conflicts: u64,
    propagations: u64,
}

impl Solved {
    fn new(solver: &mut Solver) -> Self {
        let report = solver.report();
        Solved {
            heuristic: solver.heuristic(),
            report,
            num_vars: solver.num_vars(),
            num_clauses: solver.num_clauses(),
            decisions: solver.num_decisions(),
            conflicts: solver.num_conflicts(),
            propagations: solver.num_propagations(),
        }
    }
}

fn main() {
    env_logger::init();
    let exitcode = main2().unwrap_or_else(|err| {
        eprintln!("{}", err);
        exit(1)
    });
    exit(exitcode);
}

fn main2() -> Result<i32, Box<dyn Error>> {
    let resource = system::ResourceMeasure::new();

    let matches = App::new("dpllsat")
        .version("0.1.0")
        .about("DPLL SAT solver with DLCS and MOMS branching")
        .arg(
            Arg::with_name("input-files")
                .multiple(true)
                .help("DIMACS files, possibly gzipped; reads standard input if absent"),
        )
        .arg(
            Arg::with_name("moms")
                .long("moms")
                .help("Branch with MOMS instead of DLCS"),
        )
        .arg(
            Arg::with_name("jobs")
                .short("j")
                .long("jobs")
                .help("Number of files solved in parallel")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbosity")
                .long("verb")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .help("Write the reports to this file instead of standard output")
                .takes_value(true),
        )
        .get_matches();

    let opts = SolverOpts::from_flag(matches.is_present("moms"));
    let verbosity = matches
        .value_of("verbosity")
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(1);
    if verbosity < 0 || verbosity > 2 {
        eprintln!("ERROR! value <{}> is out of range for option \"verb\" (0..=2).", verbosity);
        exit(1);
    }
    let jobs = match matches.value_of("jobs") {
        None => num_cpus(),
        Some(s) => match s.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("ERROR! invalid value <{}> for option \"jobs\".", s);
                exit(1);
            }
        },
    };

    let mut out: Box<dyn Write> = match matches.value_of("output") {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let files: Vec<String> = matches
        .values_of("input-files")
        .map(|vs| vs.map(String::from).collect())
        .unwrap_or_default();

    let exitcode = if files.is_empty() {
        if verbosity > 0 {
            println!("c Reading from standard input... Use '--help' for help.");
        }
        let stdin = io::stdin();
        let mut solver = read_input_autogz(stdin.lock(), opts)?;
        let solved = Solved::new(&mut solver);
        write_report(&mut out, "<stdin>", &solved, verbosity)?;
        if solved.report.satisfiable {
            10
        } else {
            20
        }
    } else {
        solve_files(&mut out, files, opts, jobs, verbosity)?
    };
    out.flush()?;

    if verbosity > 0 {
        println!("c CPU time              : {:.3}s", resource.cpu_time());
        println!("c wall time             : {:.3}s", resource.wall_time());
    }
    Ok(exitcode)
}

/// Solve every file on a pool of `jobs` workers, one solver per file.
///
/// Reports are written in command line order, whatever the order in
/// which the workers finish.
fn solve_files(
    out: &mut dyn Write,
    files: Vec<String>,
    opts: SolverOpts,
    jobs: usize,
    verbosity: i32,
) -> io::Result<i32> {
    let n = files.len();
    let pool = ThreadPool::new(jobs.min(n));
    let (tx, rx) = mpsc::channel();
    for (index, name) in files.iter().cloned().enumerate() {
        let tx = tx.clone();
        pool.execute(move || {
            debug!("solve file {}", name);
            let res = solve_file(&name, opts);
            // the receiver outlives the pool
            let _ = tx.send(Outcome { index, name, res });
        });
    }
    drop(tx);

    let mut outcomes: Vec<Option<Outcome>> = (0..n).map(|_| None).collect();
    for outcome in rx.iter() {
        info!("done: {} ({}/{})", outcome.name, outcome.index + 1, n);
        let i = outcome.index;
        outcomes[i] = Some(outcome);
    }

    write_outcomes(out, &files, outcomes, verbosity)
}

/// Write the reports in order and compute the exit code.
///
/// A slot left empty means the worker died before sending its outcome
/// (e.g. it panicked); it counts as an error.
fn write_outcomes(
    out: &mut dyn Write,
    files: &[String],
    outcomes: Vec<Option<Outcome>>,
    verbosity: i32,
) -> io::Result<i32> {
    let (mut errors, mut unsat) = (0, 0);
    for (name, outcome) in files.iter().zip(outcomes) {
        match outcome.map(|o| o.res) {
            Some(Ok(solved)) => {
                if !solved.report.satisfiable {
                    unsat += 1;
                }
                write_report(out, name, &solved, verbosity)?;
            }
            Some(Err(e)) => {
                errors += 1;
                eprintln!("{}: {}", name, e);
            }
            None => {
                errors += 1;
                eprintln!("{}: worker stopped before reporting a result", name);
            }
        }
    }

    Ok(if errors > 0 {
        1
    } else if unsat > 0 {
        20
    } else {
        10
    })
}

fn solve_file(name: &str, opts: SolverOpts) -> dpllsat::Result<Solved> {
    let file = BufReader::new(File::open(name)?);
    let mut solver = read_input_autogz(file, opts)?;
    Ok(Solved::new(&mut solver))
}

fn write_report(out: &mut dyn Write, name: &str, solved: &Solved, verbosity: i32) -> io::Result<()> {
    writeln!(out, "{}", name)?;
    writeln!(out, "{}", solved.heuristic)?;
    if verbosity > 0 {
        writeln!(out, "c variables: {}, clauses: {}", solved.num_vars, solved.num_clauses)?;
    }
    if verbosity > 1 {
        writeln!(
            out,
            "c decisions: {}, conflicts: {}, propagations: {}",
            solved.decisions, solved.conflicts, solved.propagations
        )?;
    }
    write!(out, "{}", solved.report)
}

fn read_input_autogz<R: BufRead>(mut input: R, opts: SolverOpts) -> dpllsat::Result<Solver> {
    let is_gz = input.fill_buf()?.starts_with(b"\x1F\x8B");
    if is_gz {
        Solver::from_dimacs(&mut BufReader::new(GzDecoder::new(input)), opts)
    } else {
        Solver::from_dimacs(&mut input, opts)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod test {
    use super::*;
    use dpllsat::Cnf;

    fn solved(clauses: &[&[i32]]) -> Solved {
        let mut cnf = Cnf::new(2);
        for c in clauses {
            cnf.add_clause_dimacs(c);
        }
        Solved::new(&mut Solver::new(&cnf, SolverOpts::default()))
    }

    fn outcome(index: usize, name: &str, res: dpllsat::Result<Solved>) -> Option<Outcome> {
        Some(Outcome { index, name: name.to_string(), res })
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}.cnf", i)).collect()
    }

    #[test]
    fn test_exit_codes() {
        let mut out = vec![];
        let all_sat = vec![outcome(0, "f0.cnf", Ok(solved(&[&[1, 2]])))];
        assert_eq!(write_outcomes(&mut out, &names(1), all_sat, 0).unwrap(), 10);

        let some_unsat = vec![
            outcome(0, "f0.cnf", Ok(solved(&[&[1, 2]]))),
            outcome(1, "f1.cnf", Ok(solved(&[&[1], &[-1]]))),
        ];
        assert_eq!(write_outcomes(&mut out, &names(2), some_unsat, 0).unwrap(), 20);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("f0.cnf\n"));
        assert!(text.contains("f1.cnf\n"));
    }

    #[test]
    fn test_missing_outcome_is_error() {
        let mut out = vec![];
        let outcomes = vec![outcome(0, "f0.cnf", Ok(solved(&[&[1, 2]]))), None];
        assert_eq!(write_outcomes(&mut out, &names(2), outcomes, 0).unwrap(), 1);
        // the file that did finish is still reported
        assert!(String::from_utf8(out).unwrap().starts_with("f0.cnf\n"));
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let mut out = vec![];
        let files = vec!["does/not/exist.cnf".to_string()];
        let code = solve_files(&mut out, files, SolverOpts::default(), 2, 0).unwrap();
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }
}
