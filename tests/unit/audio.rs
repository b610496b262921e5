use std::ffi::OsString;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "jumpscare_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn args(cmd: &Command) -> Vec<String> {
    cmd.get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn wav_only_backends_reject_mp3() {
    let mp3 = Path::new("song.MP3");
    let wav = Path::new("song.wav");
    assert!(!AudioBackend::Aplay.supports(mp3));
    assert!(AudioBackend::Aplay.supports(wav));
    assert!(!AudioBackend::PowerShell.supports(mp3));
    assert!(AudioBackend::Mpg123.supports(mp3));
    assert!(!AudioBackend::Mpg123.supports(wav));
    assert!(!AudioBackend::Paplay.supports(mp3));
    assert!(AudioBackend::Ffplay.supports(Path::new("no_extension")));
}

#[test]
fn platform_specific_backends() {
    assert_eq!(AudioBackend::Afplay.native_here(), cfg!(target_os = "macos"));
    assert_eq!(AudioBackend::PowerShell.native_here(), cfg!(windows));
    assert!(AudioBackend::Ffplay.native_here());
}

#[test]
fn ffplay_runs_headless_and_exits() {
    let cmd = AudioBackend::Ffplay.command(Path::new("a.mp3"));
    assert_eq!(cmd.get_program(), "ffplay");
    assert_eq!(
        args(&cmd),
        vec!["-nodisp", "-autoexit", "-loglevel", "quiet", "a.mp3"]
    );
}

#[test]
fn powershell_quotes_the_path() {
    let cmd = AudioBackend::PowerShell.command(Path::new("it's.wav"));
    let a = args(&cmd);
    assert_eq!(a.last().unwrap(), "(New-Object Media.SoundPlayer 'it''s.wav').PlaySync()");
}

#[test]
fn finds_program_in_path_list() {
    let tmp = temp_dir("audio_path");
    let bin = tmp.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(bin.join("mpv"), b"").unwrap();

    let list: OsString = std::env::join_paths([tmp.join("missing"), bin.clone()]).unwrap();
    assert_eq!(find_in_path_list("mpv", &list), Some(bin.join("mpv")));
    assert_eq!(find_in_path_list("ffplay", &list), None);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn directories_are_not_programs() {
    let tmp = temp_dir("audio_dir");
    std::fs::create_dir_all(tmp.join("mpv")).unwrap();
    let list: OsString = std::env::join_paths([tmp.clone()]).unwrap();
    assert_eq!(find_in_path_list("mpv", &list), None);
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_file_is_resource_missing() {
    let tmp = temp_dir("audio_missing");
    let err = play_blocking(&tmp.join("nope.mp3")).unwrap_err();
    assert!(matches!(err, JumpscareError::ResourceMissing(_)));
    assert_eq!(err.exit_code(), 1);

    let err = spawn_background(&tmp.join("nope.mp3")).unwrap_err();
    assert!(matches!(err, JumpscareError::ResourceMissing(_)));
}

#[test]
fn unknown_format_has_no_wav_only_backends() {
    let found = available_backends(Path::new("x.mp3"));
    assert!(!found.contains(&AudioBackend::Aplay));
    assert!(!found.contains(&AudioBackend::PowerShell));
}
