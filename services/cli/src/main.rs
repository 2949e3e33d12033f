use singlekey_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        for field_error in err.field_errors() {
            eprintln!("  - {field_error}");
        }
        std::process::exit(1);
    }
}
