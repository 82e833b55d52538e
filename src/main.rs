mod cli;

use std::io::stdout;
use std::process::exit;
use std::str::FromStr;

use clap::ArgMatches;
use gallery::config::Config;
use gallery::file::list_files;
use gallery::model::ViewMode;
use gallery::session::GallerySession;
use gallery::store::FileStore;
use gallery::upload::upload_files;
use gallery::utils::{progress_message, rewrite_message};
use gallery::{Gallery, GalleryError};
use tracing_subscriber::EnvFilter;

use crate::cli::{build_cli, CliCommand, UploadCmd, ALBUM, PHOTO, SEARCH, STORE, VALUE};

type GenError = Box<dyn std::error::Error>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli();
    let (name, sub) = matches.subcommand();
    let sub = sub.unwrap_or_else(|| {
        eprintln!("No command was provided, run `gallery help` to learn more");
        exit(1);
    });

    let store_flag = matches.value_of(STORE).or_else(|| sub.value_of(STORE));
    let config = Config::from_env(store_flag);
    let store = FileStore::open(&config.store_dir).unwrap_or_else(|err| {
        eprintln!("Failed to open store at {} due to error = {}", config.store_dir.display(), err);
        exit(1);
    });
    let gallery = Gallery::new(store);

    let result = match CliCommand::from_str(name) {
        Ok(cmd) => run(cmd, &gallery, sub).await,
        Err(invalid_cmd) => Err(GenError::from(invalid_cmd)),
    };

    match result {
        Ok(_) => exit(0),
        Err(err) => {
            eprintln!("❌  Failed due to error='{}'", err);
            exit(1);
        }
    }
}

async fn run(cmd: CliCommand, gallery: &Gallery<FileStore>, matches: &ArgMatches<'_>) -> Result<(), GenError> {
    // safe to unwrap required args below, clap rejects the command otherwise
    match cmd {
        CliCommand::Albums => list_albums(gallery, matches.value_of(SEARCH)),
        CliCommand::Create => {
            let mut session = GallerySession::open(gallery)?;
            let album = session.create_album()?;
            println!("📚 created {}", album);
            println!("{} albums in total", session.albums().len());
            Ok(())
        }
        CliCommand::Rename => {
            let album = gallery.rename_album(matches.value_of(ALBUM).unwrap(), matches.value_of(VALUE).unwrap())?;
            println!("{}", album);
            Ok(())
        }
        CliCommand::Spacing => {
            let spacing = parse_number(matches.value_of(VALUE).unwrap())?;
            let album = gallery.update_album_spacing(matches.value_of(ALBUM).unwrap(), spacing)?;
            println!("{} spacing={}", album, spacing);
            Ok(())
        }
        CliCommand::Size => {
            let size = parse_number(matches.value_of(VALUE).unwrap())?;
            let album = gallery.update_album_photo_size(matches.value_of(ALBUM).unwrap(), size)?;
            println!("{} size={}", album, size);
            Ok(())
        }
        CliCommand::View => {
            let mode = ViewMode::from_str(matches.value_of(VALUE).unwrap())?;
            let album = gallery.update_album_view_mode(matches.value_of(ALBUM).unwrap(), mode)?;
            println!("{} view={:?}", album, mode);
            Ok(())
        }
        CliCommand::Delete => {
            let id = matches.value_of(ALBUM).unwrap();
            let mut session = GallerySession::open(gallery)?;
            if session.delete_album(id)? {
                println!("deleted album {}, {} albums left", id, session.albums().len());
                Ok(())
            } else {
                Err(GenError::from(GalleryError::AlbumNotFound { id: id.to_owned() }))
            }
        }
        CliCommand::Photos => list_photos(gallery, matches.value_of(ALBUM).unwrap()),
        CliCommand::Upload => upload(gallery, UploadCmd::build(matches)).await,
        CliCommand::RemovePhoto => {
            let photo = gallery.remove_photo(matches.value_of(PHOTO).unwrap())?;
            println!("removed {}", photo);
            Ok(())
        }
        CliCommand::Repair => {
            let changed = gallery.repair()?;
            println!("repaired {} albums", changed);
            Ok(())
        }
    }
}

fn parse_number(value: &str) -> Result<f64, GenError> {
    value.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| GenError::from(format!("'{}' is not a valid number", value)))
}

fn list_albums(gallery: &Gallery<FileStore>, search: Option<&str>) -> Result<(), GenError> {
    let albums = gallery.search_albums(search.unwrap_or(""))?;

    println!("📚 found {} albums:", albums.len());
    albums.iter().for_each(|a| println!("\t{}", a));

    Ok(())
}

fn list_photos(gallery: &Gallery<FileStore>, album_id: &str) -> Result<(), GenError> {
    let album = gallery.album(album_id)?
        .ok_or_else(|| GalleryError::AlbumNotFound { id: album_id.to_owned() })?;
    let photos = gallery.album_photos(album_id)?;

    println!("{}, cover {}", album, album.cover_url);
    photos.iter().for_each(|p| println!("\t{}", p));

    Ok(())
}

async fn upload(gallery: &Gallery<FileStore>, cmd: UploadCmd) -> Result<(), GenError> {
    let files = list_files(&cmd.folder_name)?;
    println!("found {} files", files.len());

    if files.is_empty() {
        println!("No photos to add");
        return Ok(());
    }

    let mut out = stdout();
    let report = upload_files(gallery, &cmd.album_id, files, |done, total| {
        if let Err(err) = rewrite_message(&mut out, &progress_message(done, total)) {
            tracing::debug!(error = %err, "could not update progress line");
        }
    }).await?;

    println!();
    println!("added {} photos, skipped {} files", report.added, report.skipped);
    Ok(())
}
