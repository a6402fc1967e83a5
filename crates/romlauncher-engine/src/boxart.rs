//! Background box-art lookup where the last request started wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

use romlauncher_core::path;

use crate::constants::BOXART_EXTENSIONS;

/// Box art found (or not) for a ROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxArt {
    pub rom_path: String,
    /// Image file, if one exists.
    pub image: Option<PathBuf>,
}

#[derive(Debug)]
struct Completion {
    generation: u64,
    art: BoxArt,
}

/// Looks up box art on blocking tasks and hands back only the result of the
/// most recent request.
///
/// In-flight lookups are never cancelled; their results are dropped in
/// [`poll`](Self::poll) when a newer request has started.
#[derive(Debug)]
pub struct BoxArtLoader {
    boxart_dir: PathBuf,
    generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    /// ROM of the last request made through `select`.
    requested: Option<String>,
    /// Last result that was current when it arrived.
    latest: Option<BoxArt>,
}

impl BoxArtLoader {
    pub fn new(boxart_dir: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            boxart_dir: boxart_dir.into(),
            generation: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            requested: None,
            latest: None,
        }
    }

    /// Generation of the most recent request.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Start looking up art for `rom_path`, superseding earlier requests.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request(&self, rom_path: &str) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let latest = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let dir = self.boxart_dir.clone();
        let rom_path = rom_path.to_string();

        tokio::task::spawn_blocking(move || {
            let image = find_boxart(&dir, &rom_path);
            if latest.load(Ordering::Acquire) != generation {
                tracing::debug!(rom = %rom_path, generation, "box art superseded before send");
                return;
            }
            let _ = tx.send(Completion {
                generation,
                art: BoxArt { rom_path, image },
            });
        });

        generation
    }

    /// Follow the selection: request art only when the selected ROM changed.
    ///
    /// Returns the new generation when a request was started.
    pub fn select(&mut self, rom_path: Option<&str>) -> Option<u64> {
        if rom_path == self.requested.as_deref() {
            return None;
        }
        self.requested = rom_path.map(str::to_owned);
        rom_path.map(|path| self.request(path))
    }

    /// The most recent current result, if it belongs to `rom_path`.
    pub fn art_for(&self, rom_path: &str) -> Option<&BoxArt> {
        self.latest.as_ref().filter(|art| art.rom_path == rom_path)
    }

    /// Drain finished lookups, returning the one for the current request.
    ///
    /// The returned art is also kept for [`art_for`](Self::art_for) until a
    /// newer current result replaces it.
    pub fn poll(&mut self) -> Option<BoxArt> {
        let current = self.current_generation();
        let mut latest = None;
        while let Ok(completion) = self.rx.try_recv() {
            if completion.generation == current {
                self.latest = Some(completion.art.clone());
                latest = Some(completion.art);
            } else {
                tracing::debug!(
                    generation = completion.generation,
                    current,
                    "discarding stale box art"
                );
            }
        }
        latest
    }
}

/// `{dir}/{stem}.png`, then `{dir}/{stem}.jpg`, for the ROM's file stem.
pub fn find_boxart(dir: &Path, rom_path: &str) -> Option<PathBuf> {
    let stem = path::file_stem(rom_path);
    if stem.is_empty() {
        return None;
    }
    BOXART_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOXART_POLL_INTERVAL_MS;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn wait_for(loader: &mut BoxArtLoader) -> Option<BoxArt> {
        for _ in 0..200 {
            if let Some(art) = loader.poll() {
                return Some(art);
            }
            tokio::time::sleep(Duration::from_millis(BOXART_POLL_INTERVAL_MS)).await;
        }
        None
    }

    #[test]
    fn test_find_boxart_prefers_png() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Metroid.jpg"), b"jpg").unwrap();
        assert_eq!(
            find_boxart(temp.path(), "sdmc:/roms/nes/Metroid.nes"),
            Some(temp.path().join("Metroid.jpg"))
        );

        std::fs::write(temp.path().join("Metroid.png"), b"png").unwrap();
        assert_eq!(
            find_boxart(temp.path(), "sdmc:/roms/nes/Metroid.nes"),
            Some(temp.path().join("Metroid.png"))
        );
        assert_eq!(find_boxart(temp.path(), "sdmc:/roms/nes/Zelda.nes"), None);
    }

    #[tokio::test]
    async fn test_last_request_wins() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("first.png"), b"png").unwrap();
        std::fs::write(temp.path().join("second.png"), b"png").unwrap();

        let mut loader = BoxArtLoader::new(temp.path());
        loader.request("/roms/first.nes");
        let second = loader.request("/roms/second.nes");
        assert_eq!(loader.current_generation(), second);

        let art = wait_for(&mut loader).await.unwrap();
        assert_eq!(art.rom_path, "/roms/second.nes");
        assert_eq!(art.image, Some(temp.path().join("second.png")));

        // Nothing from the superseded request shows up later.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(loader.poll(), None);
    }

    #[tokio::test]
    async fn test_missing_art_still_completes() {
        let temp = TempDir::new().unwrap();
        let mut loader = BoxArtLoader::new(temp.path());
        loader.request("/roms/none.nes");

        let art = wait_for(&mut loader).await.unwrap();
        assert_eq!(art.image, None);
    }

    #[tokio::test]
    async fn test_select_requests_only_on_change() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Metroid.png"), b"png").unwrap();
        let mut loader = BoxArtLoader::new(temp.path());

        assert_eq!(loader.select(Some("/roms/Metroid.nes")), Some(1));
        assert_eq!(loader.select(Some("/roms/Metroid.nes")), None);
        assert_eq!(loader.current_generation(), 1);

        wait_for(&mut loader).await.unwrap();
        let art = loader.art_for("/roms/Metroid.nes").unwrap();
        assert_eq!(art.image, Some(temp.path().join("Metroid.png")));

        // Leaving the ROM and coming back asks again.
        assert_eq!(loader.select(None), None);
        assert_eq!(loader.select(Some("/roms/Metroid.nes")), Some(2));
    }

    #[tokio::test]
    async fn test_last_art_kept_until_current_result_arrives() {
        let temp = TempDir::new().unwrap();
        let mut loader = BoxArtLoader::new(temp.path());

        loader.select(Some("/roms/a.nes"));
        wait_for(&mut loader).await.unwrap();

        loader.select(Some("/roms/b.nes"));
        assert!(loader.art_for("/roms/a.nes").is_some());

        wait_for(&mut loader).await.unwrap();
        assert!(loader.art_for("/roms/b.nes").is_some());
        assert!(loader.art_for("/roms/a.nes").is_none());

        // An empty poll does not clear the kept result.
        assert_eq!(loader.poll(), None);
        assert!(loader.art_for("/roms/b.nes").is_some());
    }
}
