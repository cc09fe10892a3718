use pathway::{cli::run_cli, init};

#[tokio::main]
async fn main() {
    init();

    if let Err(err) = run_cli(std::env::args().skip(1).collect()).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
