use log::{error, info};
use std::process;
use vcbuild::{BuildError, ColorMode, Orchestrator, PhaseOutcome, PhaseRequest};

fn main() {
    vcbuild::init_logging(ColorMode::Auto);

    let args: Vec<String> = std::env::args().skip(1).collect();
    info!(
        "Build command: {}",
        if args.is_empty() {
            "none".to_string()
        } else {
            args.join(" ")
        }
    );

    let request = match PhaseRequest::parse(&args) {
        Ok(request) => request,
        Err(err) => {
            let err = BuildError::from(err);
            error!("{}", err);
            info!("Usage: vcbuild <clean | precompile | compile [link] | link>");
            process::exit(err.exit_code());
        }
    };

    if let Err(err) = run(request) {
        error!("{}", err);
        process::exit(err.exit_code());
    }
}

fn run(request: PhaseRequest) -> vcbuild::Result<PhaseOutcome> {
    let mut orchestrator = Orchestrator::from_cwd()?;
    orchestrator.execute(request)
}
