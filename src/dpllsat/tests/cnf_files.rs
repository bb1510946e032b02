use {
    dpllsat::{dimacs, lbool, Cnf, Solver, SolverInterface, SolverOpts},
    std::{fs::File, io::BufReader, path::Path},
    walkdir::WalkDir,
};

fn load(path: &Path) -> Cnf {
    let file = File::open(path).unwrap();
    dimacs::parse(&mut BufReader::new(file)).unwrap()
}

fn test_all_files(which: &str) {
    let expected = if which == "sat" { lbool::TRUE } else { lbool::FALSE };
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cnf").join(which);
    let mut count = 0;
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
    {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "cnf") {
            continue;
        }
        let cnf = load(path);
        for &opts in [SolverOpts::dlcs(), SolverOpts::moms()].iter() {
            eprintln!("Solving... {} with {}", path.display(), opts.heuristic);
            let mut solver = Solver::new(&cnf, opts);
            let res = solver.solve();
            assert_eq!(res, expected, "wrong answer for {}", path.display());
            if res == lbool::TRUE {
                assert!(
                    cnf.eval(|v| solver.value_var(v)),
                    "invalid model for {}",
                    path.display()
                );
            } else {
                assert_eq!(solver.trail_depth(), 0);
            }
        }
        count += 1;
    }
    assert!(count > 0, "no fixture under tests/cnf/{}", which);
}

#[test]
fn test_sat_files() {
    test_all_files("sat");
}

#[test]
fn test_unsat_files() {
    test_all_files("unsat");
}

#[test]
fn test_chain_needs_no_decision() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cnf/sat/chain.cnf");
    let cnf = load(&path);
    assert_eq!(cnf.num_clauses(), 6);
    let mut solver = Solver::new(&cnf, SolverOpts::dlcs());
    assert_eq!(solver.solve(), lbool::TRUE);
    assert_eq!(solver.num_decisions(), 0);
    assert_eq!(solver.get_model(), vec![lbool::TRUE; 6]);
}

#[test]
fn test_from_dimacs() {
    let mut input = "p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n".as_bytes();
    let mut solver = Solver::from_dimacs(&mut input, SolverOpts::moms()).unwrap();
    let report = solver.report();
    assert!(report.satisfiable);
    assert!(format!("{}", report).starts_with("s 1\nv 1 2 3\nt "));
}
