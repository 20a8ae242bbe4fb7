pub mod ext;
pub mod samples;
pub mod tools;
pub mod pipeline;
pub mod command;

mod err;
pub use err::{Error, Result};

fn init_logger() {
    use fern::{
        Dispatch,
        colors::{Color, ColoredLevelConfig},
    };
    let colors = ColoredLevelConfig::default()
        .info(Color::Green)
        .debug(Color::Cyan);
    let res = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {:>5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = res {
        eprintln!("Could not initialize logger: {}", e);
    }
}

fn main() {
    init_logger();
    let argv: Vec<String> = std::env::args().collect();
    if let Err(e) = command::run(&argv) {
        log::error!("{}", e.display());
        std::process::exit(1);
    }
}
