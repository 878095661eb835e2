//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a ghsecret command isolated from the host environment.
    ///
    /// AWS settings are pinned so the SDK never probes instance metadata.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ghsecret").expect("failed to find ghsecret binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("AWS_REGION", "us-east-1");
        cmd.env("AWS_EC2_METADATA_DISABLED", "true");
        cmd.env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
        cmd.env("AWS_SECRET_ACCESS_KEY", "secret");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("GHSECRET_LOG");
        cmd.env_remove("GHSECRET_CONFIG");
        cmd.env_remove("GHSECRET_GITHUB_API_URL");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `ghsecret handle` on an event file.
    pub fn handle(&self, event: &str) -> Output {
        let path = self.write("event.json", event);
        self.cmd()
            .args(["handle", "--event"])
            .arg(path)
            .output()
            .expect("failed to run ghsecret handle")
    }

    /// Run `ghsecret validate` with the event on stdin.
    pub fn validate_stdin(&self, event: &str) -> Output {
        self.cmd()
            .args(["validate"])
            .write_stdin(event.to_string())
            .output()
            .expect("failed to run ghsecret validate")
    }
}
