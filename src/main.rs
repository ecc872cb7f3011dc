use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // interruption reports exit status 1, not the shell's 128+SIGINT
    #[cfg(unix)]
    if let Err(err) = unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGINT, || {
            signal_hook::low_level::exit(1)
        })
    } {
        tracing::warn!("failed to install SIGINT handler: {err}");
    }

    std::process::exit(correlate_logs::cli::run());
}
