// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where the settings database and the exported CSV live.

use std::path::PathBuf;

use nametag_core::error::Result;

/// Return the application data directory, creating it if needed.
///
/// Mobile shells pass their own documents directory to `Session::open`
/// instead.
pub fn data_dir() -> Result<PathBuf> {
    let dir = resolve(|key| std::env::var(key).ok());
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn resolve(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let base = var("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir);
    base.join("nametag")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_xdg_data_home() {
        let dir = resolve(|key| match key {
            "XDG_DATA_HOME" => Some("/data".into()),
            "HOME" => Some("/home/desk".into()),
            _ => None,
        });
        assert_eq!(dir, PathBuf::from("/data/nametag"));
    }

    #[test]
    fn falls_back_to_home_local_share() {
        let dir = resolve(|key| match key {
            "XDG_DATA_HOME" => Some(String::new()),
            "HOME" => Some("/home/desk".into()),
            _ => None,
        });
        assert_eq!(dir, PathBuf::from("/home/desk/.local/share/nametag"));
    }

    #[test]
    fn last_resort_is_temp_dir() {
        let dir = resolve(|_| None);
        assert_eq!(dir, std::env::temp_dir().join("nametag"));
    }
}
