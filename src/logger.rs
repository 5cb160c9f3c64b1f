use log::{LevelFilter, Log, Metadata, Record};
#[cfg(target_os = "ios")]
use oslog::OsLogger;

struct StdoutLogger {
    filter: LevelFilter,
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init(filter: LevelFilter) {
    #[cfg(not(target_os = "ios"))]
    log::set_boxed_logger(Box::new(StdoutLogger { filter }))
        .map(|()| log::set_max_level(filter))
        .expect("Failed to set logger");

    #[cfg(target_os = "ios")]
    OsLogger::new("dev.roundel")
        .level_filter(filter)
        .init()
        .expect("Failed to set logger");
}
