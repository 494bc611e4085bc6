/// Route `log` output to stderr.  `RUST_LOG` overrides the default `info`
/// filter, e.g. `RUST_LOG=rr_session=debug`.
pub fn setup() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}
