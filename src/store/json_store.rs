use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::store::schema::ProfileData;

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("factdr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn profile_path(&self) -> PathBuf {
        self.base_dir.join("profile.json")
    }

    /// Missing, unreadable, or corrupt records all come back as the default
    /// profile; a broken stats file must never block a practice session.
    pub fn load_profile(&self) -> ProfileData {
        let path = self.profile_path();
        if !path.exists() {
            return ProfileData::default();
        }
        let profile: ProfileData = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => ProfileData::default(),
        };
        if profile.needs_reset() {
            return ProfileData::default();
        }
        profile
    }

    /// Whole-record overwrite, staged through a .tmp file so an interrupted
    /// write leaves the previous record intact.
    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        let path = self.profile_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
