//! The `utils` module provides shared definitions used across the `coalsub`
//! library: the error taxonomy of the publish path and a logging bootstrap.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic, including on repeat initialization
        logging::init("info");
        logging::init("debug");
        logging::init("not-a-level");
    }
}
