// Added allow(dead_code) because each test binary only uses part of this module.

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
