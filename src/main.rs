mod cli;
mod commands;
mod credentials;
mod telemetry;

use gamethrive::router::split_invocation;

use credentials::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (words, flags) = split_invocation(&args);

    let router = commands::router();
    let Some(action) = router.resolve(words).copied() else {
        println!("ERROR\n{}", router.usage());
        std::process::exit(1);
    };

    let settings = Settings::from_env();
    if let Err(e) = commands::run(action, &settings, flags).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
