use std::process::Command;

/// Value from the environment (release pipelines set it), else from `cmd`.
fn env_or_command(var: &str, cmd: &str, args: &[&str]) -> String {
    println!("cargo:rerun-if-env-changed={}", var);
    std::env::var(var).unwrap_or_else(|_| {
        Command::new(cmd)
            .args(args)
            .output()
            .ok()
            .filter(|output| output.status.success())
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    })
}

fn main() {
    let git_sha = env_or_command("GIT_SHA", "git", &["rev-parse", "--short", "HEAD"]);
    println!("cargo:rustc-env=GIT_SHA={}", git_sha);

    let build_date = env_or_command("BUILD_DATE", "date", &["+%Y-%m-%d"]);
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
