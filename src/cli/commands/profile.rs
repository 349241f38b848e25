use std::fs;
use std::path::Path;

use tally_domain::PhotoUpload;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::Table;
use crate::cli::{io, output};

const EDIT_USAGE: &str = "profile-edit <full-name|email|village|phone> <value...>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("profile", "Show your profile", "profile", cmd_profile).protected(),
        CommandEntry::new(
            "profile-edit",
            "Change one profile field",
            EDIT_USAGE,
            cmd_profile_edit,
        )
        .protected(),
        CommandEntry::new(
            "photo",
            "Upload a profile photo (png, jpg, gif, webp)",
            "photo <path>",
            cmd_photo,
        )
        .protected(),
    ]
}

fn cmd_profile(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let profile = context.session.profile()?;
    output::section(format!("Profile: {}", profile.display_name()));

    let or_dash = |value: &str| {
        if value.trim().is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    let table = Table::two_column(vec![
        ("Username".into(), or_dash(&profile.username)),
        ("Full name".into(), or_dash(&profile.full_name)),
        ("Email".into(), or_dash(&profile.email)),
        ("Village".into(), or_dash(&profile.village)),
        ("Phone".into(), or_dash(&profile.phone_number)),
        (
            "Photo".into(),
            or_dash(profile.profile_photo_url.as_deref().unwrap_or_default()),
        ),
    ]);
    output::block(&table.render());
    Ok(())
}

fn cmd_profile_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
    };

    let mut update = context.session.profile()?.to_update();
    let value = if rest.is_empty() {
        context.require_interactive(EDIT_USAGE)?;
        let current = match field.to_lowercase().as_str() {
            "full-name" | "name" => update.full_name.clone(),
            "email" => update.email.clone(),
            "village" => update.village.clone(),
            "phone" => update.phone_number.clone(),
            _ => String::new(),
        };
        io::prompt_text(&context.theme, field, Some(&current), true)?
    } else {
        rest.join(" ")
    };
    let value = value.trim().to_string();

    match field.to_lowercase().as_str() {
        "full-name" | "name" => update.full_name = value,
        "email" => update.email = value,
        "village" => update.village = value,
        "phone" => update.phone_number = value,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown profile field `{other}`; usage: {EDIT_USAGE}"
            )))
        }
    }

    let updated = context.session.update_profile(&update)?;
    io::print_success(format!("Profile updated for {}.", updated.display_name()));
    Ok(())
}

fn cmd_photo(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: photo <path>".into()));
    };
    let upload = read_photo(Path::new(path))?;
    let uploaded = context.session.upload_photo(&upload)?;
    io::print_success(
        uploaded
            .message
            .clone()
            .unwrap_or_else(|| "Photo updated.".to_string()),
    );
    io::print_info(format!("Photo URL: {}", uploaded.file_url));
    Ok(())
}

fn read_photo(path: &Path) -> Result<PhotoUpload, CommandError> {
    let bytes = fs::read(path).map_err(|err| {
        CommandError::Message(format!("Cannot read `{}`: {err}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    Ok(PhotoUpload {
        file_name,
        content_type: content_type_for(path).to_string(),
        bytes,
    })
}

/// MIME type from the file extension; unknown types are rejected on upload.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("me.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("me.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn read_photo_keeps_file_name_and_bytes() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a").unwrap();

        let upload = read_photo(file.path()).unwrap();
        assert_eq!(upload.content_type, "image/gif");
        assert_eq!(upload.bytes, b"GIF89a");
        assert!(upload.file_name.ends_with(".gif"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_photo(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
