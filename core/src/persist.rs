//! Line-delimited JSON post store: one post per line, in corpus order.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::{Post, RecapError, Result};

/// Writes every post with a title. The file is replaced atomically through a sibling temp file.
pub fn save_posts(path: &Path, posts: &[Post]) -> Result<usize> {
    let tmp = path.with_extension("json.tmp");
    let mut written = 0;
    {
        let mut w = BufWriter::new(File::create(&tmp)?);
        for post in posts.iter().filter(|p| p.is_indexable()) {
            serde_json::to_writer(&mut w, post)?;
            w.write_all(b"\n")?;
            written += 1;
        }
        w.flush()?;
    }
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), written, "saved post store");
    Ok(written)
}

/// Reads the store back. Any line that does not decode, blank ones included, yields a zero-value
/// post; its empty title keeps it out of every filtered cloud.
pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let f = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(RecapError::CorpusNotIndexed { path: path.to_path_buf() })
        }
        Err(err) => return Err(err.into()),
    };
    let mut posts = Vec::new();
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        let post = serde_json::from_str(&line).unwrap_or_else(|err| {
            warn!(line = lineno + 1, %err, "malformed post store line");
            Post::default()
        });
        posts.push(post);
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use time::macros::datetime;

    #[test]
    fn round_trip_keeps_fields_and_precision() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let posts = vec![
            Post { title: "A".into(), date: datetime!(2006-01-02 0:00 UTC), description: "first".into() },
            Post { title: "B".into(), date: datetime!(2021-11-30 13:45:01.123456789 UTC), description: "".into() },
        ];
        assert_eq!(save_posts(&path, &posts).unwrap(), 2);
        assert_eq!(load_posts(&path).unwrap(), posts);
    }

    #[test]
    fn sentinels_are_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let posts = vec![Post { title: "A".into(), ..Post::default() }, Post::default()];
        assert_eq!(save_posts(&path, &posts).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn malformed_line_becomes_zero_post() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(
            &path,
            "{\"title\":\"A\",\"date\":\"2006-01-02T00:00:00Z\",\"desc\":\"a\"}\nnot json\n\n{\"title\":\"B\",\"date\":\"2006-01-03T00:00:00Z\",\"desc\":\"b\"}\n",
        )
        .unwrap();
        let posts = load_posts(&path).unwrap();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].title, "A");
        assert_eq!(posts[1], Post::default());
        assert_eq!(posts[2], Post::default());
        assert_eq!(posts[3].title, "B");
    }

    #[test]
    fn missing_store_asks_for_build() {
        let dir = tempdir().unwrap();
        let err = load_posts(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RecapError::CorpusNotIndexed { .. }));
        assert!(err.to_string().contains("build"));
    }
}
