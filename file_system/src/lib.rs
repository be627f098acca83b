use std::{fs, io, path::PathBuf};

use directories_next::ProjectDirs;

/// Returns path to database file located in default data dir for application.
pub fn get_database_path() -> io::Result<PathBuf> {
    Ok(get_default_data_dir()?.join("catalog.sqlite"))
}

/// Returns the directory downloaded reference listings are cached in.
pub fn get_reference_listing_dir() -> io::Result<PathBuf> {
    let dir = get_default_data_dir()?.join("reference-listings");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the default location of the localized catalog CSV files.
pub fn get_catalog_source_dir() -> io::Result<PathBuf> {
    Ok(get_default_data_dir()?.join("catalog"))
}

fn get_default_data_dir() -> io::Result<PathBuf> {
    let project_dirs = get_project_dirs()?;
    let data_dir = project_dirs.data_local_dir();
    fs::create_dir_all(data_dir)?;
    Ok(PathBuf::from(data_dir))
}

fn get_project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from("org", "retrolabel", "retrolabel").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine project directory")
    })
}
