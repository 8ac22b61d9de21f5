use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};

#[ctor::ctor]
fn init() {
    if log4rs::init_file("log4rs.yaml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}
