use log::LevelFilter;
use rand::prelude::*;
use simple_logger::SimpleLogger;

#[allow(dead_code)]
pub fn init_logger() {
    // Every test calls this, only the first one installs the logger.
    let _ = SimpleLogger::new().with_level(LevelFilter::Debug).init();
}

#[allow(dead_code)]
pub fn payload(len: usize, seed: u64) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut payload);
    payload
}
