mod entry;
mod region;
mod result;
mod settings;

pub use entry::{Entry, EntryError, EntryPool, PoolError};
pub use region::{Region, RegionError};
pub use result::{QuizResult, QuizResultError};
pub use settings::{PoolPolicy, QuizSettings, SettingsCatalog, SettingsError};
