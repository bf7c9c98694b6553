#[cfg(test)]
mod tests {
    use crate::highscore::{HighScoreStore, load_from_path, save_to_path};
    use tempfile::tempdir;

    #[test]
    fn test_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::at(dir.path().join("highscore"));

        assert_eq!(store.load(), 0);
        store.save(88);
        assert_eq!(store.load(), 88);
    }

    #[test]
    fn test_detached_store_is_inert() {
        let store = HighScoreStore::detached();
        store.save(500);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore");

        save_to_path(&path, 4200).unwrap();
        assert_eq!(load_from_path(&path), 4200);
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("highscore");

        save_to_path(&path, 7).unwrap();
        assert_eq!(load_from_path(&path), 7);
    }

    #[test]
    fn test_negative_scores_survive() {
        // Chaotic scoring can push the record below zero on a fresh install.
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore");

        save_to_path(&path, -40).unwrap();
        assert_eq!(load_from_path(&path), -40);
    }

    #[test]
    fn test_missing_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        assert_eq!(load_from_path(&dir.path().join("absent")), 0);
    }

    #[test]
    fn test_corrupt_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore");
        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(load_from_path(&path), 0);
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore");
        std::fs::write(&path, "  1234\n").unwrap();
        assert_eq!(load_from_path(&path), 1234);
    }
}
