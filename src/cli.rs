use std::str::FromStr;
use clap::{ArgMatches, App, AppSettings, Arg};

static VERSION: &str = "0.1.0";
static AUTHOR: &str = "apmaros";
static DESCRIPTION: &str = "Keep photo albums in a local store";

pub(crate) const STORE: &str = "store";
pub(crate) const ALBUMS: &str = "albums";
pub(crate) const CREATE: &str = "create";
pub(crate) const RENAME: &str = "rename";
pub(crate) const SPACING: &str = "spacing";
pub(crate) const SIZE: &str = "size";
pub(crate) const VIEW: &str = "view";
pub(crate) const DELETE: &str = "delete";
pub(crate) const PHOTOS: &str = "photos";
pub(crate) const UPLOAD: &str = "upload";
pub(crate) const REMOVE_PHOTO: &str = "remove-photo";
pub(crate) const REPAIR: &str = "repair";

pub(crate) const ALBUM: &str = "album";
pub(crate) const FOLDER: &str = "folder";
pub(crate) const SEARCH: &str = "search";
pub(crate) const VALUE: &str = "value";
pub(crate) const PHOTO: &str = "photo";

fn album_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(ALBUM)
        .short("a")
        .long(ALBUM)
        .takes_value(true)
        .required(true)
        .help("Album identifier")
}

fn value_arg<'a, 'b>(help: &'static str) -> Arg<'a, 'b> {
    Arg::with_name(VALUE)
        .index(1)
        .required(true)
        .help(help)
}

pub(crate) fn build_cli<'a>() -> ArgMatches<'a> {
    App::new("gallery")
        .version(VERSION)
        .author(AUTHOR)
        .about(DESCRIPTION)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(Arg::with_name(STORE)
            .long(STORE)
            .takes_value(true)
            .global(true)
            .help("Directory holding the gallery store (defaults to $GALLERY_STORE or .gallery)"))
        .subcommand(App::new(ALBUMS)
            .about("Lists albums")
            .arg(Arg::with_name(SEARCH)
                .short("s")
                .long(SEARCH)
                .takes_value(true)
                .help("Only albums whose title contains this text")))
        .subcommand(App::new(CREATE)
            .about("Creates an empty album"))
        .subcommand(App::new(RENAME)
            .about("Changes an album title")
            .arg(album_arg())
            .arg(value_arg("New title")))
        .subcommand(App::new(SPACING)
            .about("Sets the spacing between photos")
            .arg(album_arg())
            .arg(value_arg("Spacing")))
        .subcommand(App::new(SIZE)
            .about("Sets the photo size")
            .arg(album_arg())
            .arg(value_arg("Photo size")))
        .subcommand(App::new(VIEW)
            .about("Sets the view mode")
            .arg(album_arg())
            .arg(value_arg("grid, masonry or list")))
        .subcommand(App::new(DELETE)
            .about("Deletes an album with all of its photos")
            .arg(album_arg()))
        .subcommand(App::new(PHOTOS)
            .about("Lists photos of an album")
            .arg(album_arg()))
        .subcommand(App::new(UPLOAD)
            .about("Adds images from a folder to an album")
            .arg(album_arg())
            .arg(Arg::with_name(FOLDER)
                .short("f")
                .long(FOLDER)
                .takes_value(true)
                .required(true)
                .help("Folder containing images to be added")))
        .subcommand(App::new(REMOVE_PHOTO)
            .about("Removes a single photo")
            .arg(Arg::with_name(PHOTO)
                .index(1)
                .required(true)
                .help("Photo identifier")))
        .subcommand(App::new(REPAIR)
            .about("Recomputes photo counts and covers"))
        .get_matches()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CliCommand {
    Albums,
    Create,
    Rename,
    Spacing,
    Size,
    View,
    Delete,
    Photos,
    Upload,
    RemovePhoto,
    Repair,
}

impl FromStr for CliCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALBUMS => Ok(Self::Albums),
            CREATE => Ok(Self::Create),
            RENAME => Ok(Self::Rename),
            SPACING => Ok(Self::Spacing),
            SIZE => Ok(Self::Size),
            VIEW => Ok(Self::View),
            DELETE => Ok(Self::Delete),
            PHOTOS => Ok(Self::Photos),
            UPLOAD => Ok(Self::Upload),
            REMOVE_PHOTO => Ok(Self::RemovePhoto),
            REPAIR => Ok(Self::Repair),
            other => Err(format!("Command {} was not recognised", other)),
        }
    }
}

pub(crate) struct UploadCmd {
    pub(crate) folder_name: String,
    pub(crate) album_id: String,
}

impl UploadCmd {
    pub(crate) fn build(matches: &ArgMatches) -> Self {
        // safe to unwrap, these args are required
        let folder_name = matches.value_of(FOLDER).unwrap().to_owned();
        let album_id = matches.value_of(ALBUM).unwrap().to_owned();

        UploadCmd { folder_name, album_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand_name() {
        for name in &[ALBUMS, CREATE, RENAME, SPACING, SIZE, VIEW, DELETE, PHOTOS, UPLOAD, REMOVE_PHOTO, REPAIR] {
            assert!(CliCommand::from_str(name).is_ok(), "{} should parse", name);
        }
        assert_eq!(CliCommand::from_str("remove-photo"), Ok(CliCommand::RemovePhoto));
        assert!(CliCommand::from_str("download").is_err());
    }
}
