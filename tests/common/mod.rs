use invest_solver::datastructures::Action;

pub fn action(name: &str, cost: f64, benefit_percent: f64) -> Action {
    Action::new(name.to_string(), cost, benefit_percent)
}

pub fn sample_actions() -> Vec<Action> {
    vec![
        action("A", 100.0, 10.0),
        action("B", 200.0, 20.0),
        action("C", 50.0, 5.0),
    ]
}
