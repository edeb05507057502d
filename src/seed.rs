use anyhow::{bail, Result};
use chrono::Utc;
use std::fs;

use polls::{QuestionSeed, QuestionStore, Settings};

fn main() -> Result<()> {
    let cfg = Settings::new()?;
    simple_logger::init_with_level(cfg.log_level)?;
    let seed_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => bail!("usage: pollseed <questions.json>"),
    };
    let seeds: Vec<QuestionSeed> = serde_json::from_str(&fs::read_to_string(&seed_path)?)?;
    log::info!("Read {} questions from {}", seeds.len(), seed_path);

    let sled_db = cfg.sled_config().open()?;
    log::info!(
        "Sled info:\nwas recovered? {:?}\ndisk size: {:?}\nlength: {:?}",
        sled_db.was_recovered(),
        sled_db.size_on_disk(),
        sled_db.len()
    );
    let store = QuestionStore::new(sled_db)?;
    match store.insert_batch(&seeds, Utc::now()) {
        Ok(created) => {
            for q in &created {
                log::info!("#{} {:?} published {}", q.id, q.text, q.publication_time);
            }
            log::info!("Questions written to database: {}", created.len());
        }
        Err(e) => {
            log::error!("Batch write failed. {:?}", e);
            return Err(e.into());
        }
    }
    store.database().flush()?;
    Ok(())
}
