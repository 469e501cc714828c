use tailcheck::logging::init_tracing;
use tailcheck::{Outcome, run_from_env};

fn main() {
    init_tracing();
    match run_from_env() {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Failure) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
