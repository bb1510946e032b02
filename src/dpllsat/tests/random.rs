//! Agreement with brute force enumeration on small random formulas.

use {
    dpllsat::{lbool, Cnf, Solver, SolverInterface, SolverOpts, Var},
    rand::{rngs::StdRng, Rng, SeedableRng},
};

fn random_cnf(rng: &mut StdRng, num_vars: u32, num_clauses: usize) -> Cnf {
    let mut cnf = Cnf::new(num_vars);
    for _ in 0..num_clauses {
        let len = rng.random_range(1..=3);
        let clause: Vec<i32> = (0..len)
            .map(|_| {
                let v = rng.random_range(1..=num_vars) as i32;
                if rng.random_bool(0.5) {
                    v
                } else {
                    -v
                }
            })
            .collect();
        cnf.add_clause_dimacs(&clause);
    }
    cnf
}

fn brute_force(cnf: &Cnf) -> bool {
    let n = cnf.num_vars();
    (0u32..1 << n).any(|m| cnf.eval(|v: Var| lbool::new(m & (1 << v.idx()) != 0)))
}

/// Complete a model by giving unassigned variables an arbitrary value.
fn completed(model: &[lbool], fill: bool) -> Vec<lbool> {
    model
        .iter()
        .map(|&b| if b.is_undef() { lbool::new(fill) } else { b })
        .collect()
}

#[test]
fn test_agrees_with_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..300 {
        let num_vars = rng.random_range(1..=10);
        let num_clauses = rng.random_range(0..=4 * num_vars as usize);
        let cnf = random_cnf(&mut rng, num_vars, num_clauses);
        let expected = brute_force(&cnf);

        for &opts in [SolverOpts::dlcs(), SolverOpts::moms()].iter() {
            let mut solver = Solver::new(&cnf, opts);
            let res = solver.solve();
            assert_eq!(res == lbool::TRUE, expected, "round {}:\n{}", round, cnf);
            if expected {
                let model = solver.get_model();
                for &fill in [false, true].iter() {
                    let full = completed(&model, fill);
                    assert!(cnf.eval(|v| full[v.idx() as usize]), "round {}:\n{}", round, cnf);
                }
            } else {
                assert_eq!(solver.trail_depth(), 0);
            }
        }
    }
}

#[test]
fn test_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let cnf = random_cnf(&mut rng, 12, 40);
        for &opts in [SolverOpts::dlcs(), SolverOpts::moms()].iter() {
            let mut s1 = Solver::new(&cnf, opts);
            let mut s2 = Solver::new(&cnf, opts);
            assert_eq!(s1.solve(), s2.solve());
            assert_eq!(s1.get_model(), s2.get_model());
            assert_eq!(s1.num_decisions(), s2.num_decisions());
            assert_eq!(s1.num_conflicts(), s2.num_conflicts());
        }
    }
}

#[test]
fn test_solver_on_other_thread() {
    let mut rng = StdRng::seed_from_u64(3);
    let cnf = random_cnf(&mut rng, 10, 30);
    let expected = brute_force(&cnf);
    let mut solver = Solver::new(&cnf, SolverOpts::moms());
    let handle = std::thread::spawn(move || solver.solve() == lbool::TRUE);
    assert_eq!(handle.join().unwrap(), expected);
}
