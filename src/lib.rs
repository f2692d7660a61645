mod error;
pub mod formula;
mod generator;

pub use error::GenerateError;
pub use formula::{Clause, Literal, Variable};
pub use generator::{
    generate, parse_count, Cancel, Generator, GeneratorConfig, LogObserver, Observer, Summary,
    DEFAULT_PROGRESS_INTERVAL, MIN_VARIABLES,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::text::parse;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs::File;
    use std::io::{BufWriter, Read, Seek, SeekFrom};
    use tempfile::NamedTempFile;
    use test_env_log::test;

    #[test]
    fn generate_to_file() {
        let mut file = NamedTempFile::new().unwrap();
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            let summary = generate(
                GeneratorConfig::new(1000, 2500),
                StdRng::seed_from_u64(1000),
                &mut writer,
                &mut LogObserver,
            )
            .unwrap();
            assert_eq!(summary.clauses, 2500);
        }

        let clauses = parse(File::open(file.path()).unwrap()).unwrap();
        assert_eq!(clauses.len(), 2500);
        assert!(clauses.iter().all(|c| !c.is_empty() && c.len() <= 100));

        let mut text = String::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_to_string(&mut text).unwrap();
        assert!(text.ends_with('\n'));
        assert!(!text.contains('\r'));
        assert!(!text.contains(' '));
    }

    #[test]
    fn ten_variables_reproducible_in_file() {
        let run = || {
            let file = NamedTempFile::new().unwrap();
            let mut writer = BufWriter::new(file.reopen().unwrap());
            generate(GeneratorConfig::new(10, 3), StdRng::seed_from_u64(42), &mut writer, &mut ()).unwrap();
            drop(writer);
            std::fs::read(file.path()).unwrap()
        };

        let first = run();
        assert_eq!(first, run());

        let text = String::from_utf8(first).unwrap();
        assert_eq!(text.lines().count(), 3);
        for line in text.lines() {
            let idx = line.trim_start_matches('~').strip_prefix('x').unwrap();
            assert!(idx.parse::<usize>().unwrap() < 10, "{}", line);
            assert!(!line.contains(','));
        }
    }
}
