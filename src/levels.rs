use crate::game::{Board, BoardError};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Error type for level parsing operations.
#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// A level failed board validation
    InvalidLevel { index: usize, source: BoardError },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::InvalidLevel { index, source } => {
                write!(f, "Invalid level {}: {}", index + 1, source)
            }
        }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            LevelError::InvalidLevel { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

/// A collection of Sokoban levels in XSB format.
#[derive(Debug)]
pub struct Levels {
    levels: Vec<Board>,
}

impl Levels {
    /// Parse XSB-formatted Sokoban levels from a string.
    ///
    /// Lines starting with `;` are comments and end the current level, as
    /// does a blank line. Every level is validated as it is parsed.
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        let mut current_level = String::new();

        for line in contents.lines() {
            let is_separator = line.trim_start().starts_with(';') || line.trim().is_empty();
            if is_separator {
                Self::flush(&mut current_level, &mut levels)?;
                continue;
            }

            current_level.push_str(line);
            current_level.push('\n');
        }

        // Don't forget the last level if file doesn't end with empty line
        Self::flush(&mut current_level, &mut levels)?;

        Ok(Levels { levels })
    }

    fn flush(current_level: &mut String, levels: &mut Vec<Board>) -> Result<(), LevelError> {
        if current_level.is_empty() {
            return Ok(());
        }
        let board = Board::from_text(current_level.trim_end()).map_err(|source| {
            LevelError::InvalidLevel {
                index: levels.len(),
                source,
            }
        })?;
        levels.push(board);
        current_level.clear();
        Ok(())
    }

    /// Parse XSB-formatted Sokoban levels from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.levels.get(index)
    }

    /// Get the number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let level1 = "####
# .#
#  ###
#*@  #
#  $ #
#  ###
####";

        let level2 = "######
#    #
# #@ #
# $* #
# .* #
#    #
######";

        let level3 = "  ####
###  ####
#     $ #
# #  #$ #
# . .#@ #
#########";

        let xsb_content = format!(
            "; 1\n\n{}\n\n; 2\n\n{}\n\n; 3\n\n{}\n",
            level1, level2, level3
        );

        let levels = Levels::from_text(&xsb_content).unwrap();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels.get(0).unwrap().to_string().trim_end(), level1);
        assert_eq!(levels.get(1).unwrap().to_string().trim_end(), level2);
        assert_eq!(levels.get(2).unwrap().to_string().trim_end(), level3);
        assert!(levels.get(3).is_none());
    }

    #[test]
    fn test_comment_without_blank_line() {
        let xsb_content = "; first\n#####\n#@$.#\n#####\n; second\n######\n#@ $.#\n######";
        let levels = Levels::from_text(xsb_content).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels.get(1).unwrap().cols(), 6);
    }

    #[test]
    fn test_from_text_invalid_level() {
        let xsb_content = "; 1

#####
#@$.#
#####

; 2

####
# .#
#@@  #
####
";

        let result = Levels::from_text(xsb_content);
        assert!(matches!(
            result,
            Err(LevelError::InvalidLevel {
                index: 1,
                source: BoardError::MultiplePlayers
            })
        ));
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Levels::from_file("nonexistent_file.xsb");
        assert!(matches!(result, Err(LevelError::Io(_))));
    }

    #[test]
    fn test_bundled_samples() {
        let contents = include_str!("../levels/samples.xsb");
        let levels = Levels::from_text(contents).unwrap();
        assert_eq!(levels.len(), 2);
        for index in 0..levels.len() {
            let board = levels.get(index).unwrap();
            assert_eq!((board.rows(), board.cols()), (10, 10));
            assert_eq!(board.box_positions().count(), 4);
        }
    }
}
