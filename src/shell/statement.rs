use crate::utils::shell::{double_quote, single_quote};
use std::fmt;

pub const AGENT_PID_VAR: &str = "SSH_AGENT_PID";
pub const AUTH_SOCK_VAR: &str = "SSH_AUTH_SOCK";

/// A statement printed for the calling shell to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Export { name: String, value: String },
    AddIdentity { command: String },
    /// Terminate every process named `process_name`, silently.
    Kill { process_name: String },
}

impl Statement {
    pub fn export(name: impl Into<String>, value: impl Into<String>) -> Self {
        Statement::Export {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The `SSH_AGENT_PID` and `SSH_AUTH_SOCK` exports, in that order.
    pub fn agent_exports(agent_pid: &str, auth_socket: &str) -> [Statement; 2] {
        [
            Statement::export(AGENT_PID_VAR, agent_pid),
            Statement::export(AUTH_SOCK_VAR, auth_socket),
        ]
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Export { name, value } => {
                write!(f, "export {}={}", name, double_quote(value))
            }
            Statement::AddIdentity { command } => f.write_str(command),
            // Match on the basename of argv[0]: `comm` is cut to 15 chars on
            // Linux and is a full path on macOS.
            Statement::Kill { process_name } => write!(
                f,
                r#"ps -e -o pid=,args= | awk -v name={} '{{ n = $2; sub(".*/", "", n) }} n == name {{ print $1 }}' | xargs kill > /dev/null 2>&1 || true"#,
                single_quote(process_name)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{BashExecutor, ShellExecutor, ShellRequest};

    #[test]
    fn test_export_rendering() {
        assert_eq!(
            Statement::export(AGENT_PID_VAR, "123").to_string(),
            r#"export SSH_AGENT_PID="123""#
        );
        assert_eq!(
            Statement::export(AUTH_SOCK_VAR, "some-file").to_string(),
            r#"export SSH_AUTH_SOCK="some-file""#
        );
    }

    #[test]
    fn test_export_escapes_value() {
        assert_eq!(
            Statement::export(AUTH_SOCK_VAR, "/tmp/$HOME").to_string(),
            r#"export SSH_AUTH_SOCK="/tmp/\$HOME""#
        );
    }

    #[test]
    fn test_agent_exports_order() {
        let [pid, sock] = Statement::agent_exports("789", "some-other-file");
        assert_eq!(pid.to_string(), r#"export SSH_AGENT_PID="789""#);
        assert_eq!(sock.to_string(), r#"export SSH_AUTH_SOCK="some-other-file""#);
    }

    #[test]
    fn test_auth_sock_name() {
        assert_eq!(AUTH_SOCK_VAR, "SSH_AUTH_SOCK");
    }

    #[test]
    fn test_add_identity_rendering() {
        let statement = Statement::AddIdentity {
            command: "ssh-add".to_string(),
        };
        assert_eq!(statement.to_string(), "ssh-add");
    }

    #[test]
    fn test_kill_rendering() {
        let statement = Statement::Kill {
            process_name: "ssh-agent".to_string(),
        };
        assert_eq!(
            statement.to_string(),
            r#"ps -e -o pid=,args= | awk -v name='ssh-agent' '{ n = $2; sub(".*/", "", n) } n == name { print $1 }' | xargs kill > /dev/null 2>&1 || true"#
        );
    }

    /// Run a kill statement against a canned process listing and return the
    /// pids it would signal.
    fn selected_pids(process_name: &str, listing: &str) -> Vec<String> {
        let statement = Statement::Kill {
            process_name: process_name.to_string(),
        };
        let script = format!(
            "exec 3>&1\nps() {{ printf '%s' {}; }}\nxargs() {{ cat >&3; }}\n{}",
            single_quote(listing),
            statement
        );
        BashExecutor
            .run(&ShellRequest::new(script))
            .unwrap()
            .lines
    }

    const LISTING: &str = "  101 /usr/bin/ssh-agent -s
  102 /tmp/bin/my-long-ssh-agent-name
  103 ssh-agent -D
  104 vim ssh-agent
  105 /usr/bin/gpg-ssh-agent
";

    #[test]
    fn test_kill_matches_path_prefixed_command() {
        assert_eq!(selected_pids("ssh-agent", LISTING), vec!["101", "103"]);
    }

    #[test]
    fn test_kill_matches_names_longer_than_comm() {
        assert_eq!(
            selected_pids("my-long-ssh-agent-name", LISTING),
            vec!["102"]
        );
    }

    #[test]
    fn test_kill_succeeds_when_nothing_matches() {
        let statement = Statement::Kill {
            process_name: "gsh-no-such-agent-name".to_string(),
        };
        assert!(BashExecutor
            .run(&ShellRequest::new(statement.to_string()))
            .is_ok());
    }
}
