use cmdchain::config::Config;
use cmdchain::{BuildError, CommandBuilder, Error, escape};

fn new(name: &str) -> CommandBuilder {
    CommandBuilder::new(name)
}

macro_rules! render_test {
    ($name:ident, $builder:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let rendered = $builder.render().expect("valid command");
            assert_eq!(rendered, $expected);
        }
    };
}

fn from_json(input: &str) -> Result<String, Error> {
    cmdchain::render_json(input, &Config::default_config())
}

// ── Basic commands ──

render_test!(simple_ls, new("ls").with_argument("-la"), "ls -la");
render_test!(
    echo_to_file,
    new("echo").with_argument("Hello").redirect_to_file("output.txt"),
    "echo Hello > output.txt"
);
render_test!(
    echo_pipe_grep,
    new("echo")
        .with_argument("Hello")
        .pipe_to(new("grep").with_argument("H")),
    "echo Hello | grep H"
);
render_test!(
    sleep_background,
    new("sleep").with_argument("10").background(),
    "sleep 10 &"
);
render_test!(
    apostrophe,
    new("echo").with_argument("it's here"),
    r#"echo 'it'"'"'s here'"#
);

// ── Argument kinds ──

render_test!(
    quoted_argument,
    new("echo").with_quoted_argument("hello"),
    "echo \"hello\""
);
render_test!(
    variable_argument,
    new("echo").with_variable("HOME"),
    "echo $HOME"
);
render_test!(
    glob_argument,
    new("ls").with_glob_argument("*.txt"),
    "ls *.txt"
);
render_test!(
    path_argument,
    new("cd").with_path_argument("/path/with spaces"),
    "cd \"/path/with spaces\""
);
render_test!(
    key_value_argument,
    new("docker")
        .with_subcommand("run")
        .with_key_value_argument("--name", "web")
        .with_argument("nginx"),
    "docker run --name=web nginx"
);
render_test!(
    key_path_argument,
    new("cargo")
        .with_subcommand("build")
        .with_key_path_argument("--manifest-path", "/my src/Cargo.toml"),
    "cargo build --manifest-path=\"/my src/Cargo.toml\""
);
render_test!(
    metacharacter_in_argument,
    new("echo").with_argument("a;b|c"),
    "echo 'a;b|c'"
);

// ── Modifiers ──

render_test!(
    sudo_prefix,
    new("apt-get").with_subcommand("install").with_argument("-y").with_sudo(),
    "sudo apt-get install -y"
);
render_test!(
    env_sorted_before_sudo,
    new("make")
        .with_env("CC", "clang")
        .with_env("CFLAGS", "-O2 -g")
        .with_sudo(),
    "CC=clang CFLAGS='-O2 -g' sudo make"
);
render_test!(
    grouped_command,
    new("ls").with_argument("-la").grouped().redirect_to_file("listing.txt"),
    "(ls -la) > listing.txt"
);
render_test!(
    all_redirections,
    new("sort")
        .redirect_from_file("in.txt")
        .append_to_file("out.txt")
        .redirect_stderr_to_file("err.txt")
        .merge_stdout_and_stderr()
        .background(),
    "sort < in.txt >> out.txt 2> err.txt 2>&1 &"
);
render_test!(
    dev_null,
    new("curl").with_argument("-s").redirect_to_dev_null(),
    "curl -s > /dev/null"
);

// ── Chains ──

render_test!(
    and_or_chain,
    new("make")
        .and(new("make").with_argument("install"))
        .or(new("echo").with_quoted_argument("build failed")),
    "make && make install || echo \"'build failed'\""
);
render_test!(
    grouped_segment_in_chain,
    new("cat")
        .with_argument("log")
        .pipe_to(new("grep").with_argument("ERROR").grouped())
        .and(new("echo").with_argument("found")),
    "cat log | (grep ERROR) && echo found"
);

// ── Properties ──

#[test]
fn plain_words_round_trip_through_lexer() {
    let words = ["-la", "file.txt", "/usr/bin", "a=b", "x,y", "*.rs"];
    for w in words {
        assert_eq!(escape(w), w);
        let out = new("cmd").with_argument(w).render().unwrap();
        assert_eq!(shlex::split(&out).unwrap(), vec!["cmd", w]);
    }
}

#[test]
fn quoted_words_round_trip_through_lexer() {
    let words = ["hello world", "it's", "$HOME", "a && b", "`id`", "semi;colon", "\"dq\""];
    for w in words {
        let out = new("printf").with_argument(w).render().unwrap();
        assert_eq!(shlex::split(&out).unwrap(), vec!["printf", w], "word {w:?}");
    }
}

#[test]
fn chain_with_k_links_has_k_operators() {
    for k in 0..6 {
        let mut b = new("seg0");
        for i in 1..=k {
            let next = new(&format!("seg{i}"));
            b = match i % 3 {
                0 => b.pipe_to(next),
                1 => b.and(next),
                _ => b.or(next),
            };
        }
        let out = b.render().unwrap();
        let tokens = shlex::split(&out).unwrap();
        let ops = tokens
            .iter()
            .filter(|t| matches!(t.as_str(), "|" | "&&" | "||"))
            .count();
        let segs = tokens.iter().filter(|t| t.starts_with("seg")).count();
        assert_eq!(ops, k);
        assert_eq!(segs, k + 1);
        assert!(!out.ends_with(' '));
    }
}

#[test]
fn rendering_twice_is_identical() {
    let cmd = new("env")
        .with_env("Z", "1")
        .with_env("A", "2")
        .with_env("M", "3 4")
        .pipe_to(new("sort"))
        .build()
        .unwrap();
    let first = cmd.to_string();
    assert_eq!(first, "A=2 M='3 4' Z=1 env | sort");
    assert_eq!(cmd.to_string(), first);
}

#[test]
fn empty_name_rejected_at_build() {
    assert!(matches!(
        new("").with_argument("x").build(),
        Err(BuildError::EmptyName { position: 0 })
    ));
}

// ── JSON input ──

#[test]
fn json_minimal() {
    assert_eq!(from_json(r#"{"name": "ls", "args": [{"value": "-la"}]}"#).unwrap(), "ls -la");
}

#[test]
fn json_full_descriptor() {
    let input = r#"{
        "name": "git",
        "subcommands": ["commit"],
        "args": [
            {"value": "-m"},
            {"value": "it's done"},
            {"value": "Jo", "kind": {"key_value": {"key": "--author"}}}
        ],
        "env": {"GIT_PAGER": "cat"},
        "redirections": [{"op": ">", "target": "out.log"}],
        "stderr": "err.log",
        "next": {"operator": "&&", "command": {"name": "git", "subcommands": ["push"]}}
    }"#;
    assert_eq!(
        from_json(input).unwrap(),
        r#"GIT_PAGER=cat git commit -m 'it'"'"'s done' --author=Jo > out.log 2> err.log && git push"#
    );
}

#[test]
fn json_operator_words() {
    let input = r#"{"name": "a", "next": {"operator": "or", "command": {"name": "b"}}}"#;
    assert_eq!(from_json(input).unwrap(), "a || b");
}

#[test]
fn json_empty_name_in_chain() {
    let input = r#"{"name": "a", "next": {"operator": "|", "command": {"name": ""}}}"#;
    assert!(matches!(
        from_json(input),
        Err(Error::Build(BuildError::EmptyName { position: 1 }))
    ));
}

#[test]
fn json_missing_name() {
    assert!(matches!(from_json(r#"{"args": []}"#), Err(Error::Json(_))));
}

#[test]
fn json_with_env_defaults() {
    let mut config = Config::default_config();
    config.env.defaults.insert("LC_ALL".into(), "C".into());
    let out = cmdchain::render_json(
        r#"{"name": "sort", "next": {"operator": "|", "command": {"name": "uniq"}}}"#,
        &config,
    )
    .unwrap();
    assert_eq!(out, "LC_ALL=C sort | uniq");
}

#[test]
fn json_with_syntax_check() {
    let mut config = Config::default_config();
    config.settings.check_syntax = true;
    let out = cmdchain::render_json(
        r#"{"name": "echo", "args": [{"value": "a b"}], "background": true}"#,
        &config,
    )
    .unwrap();
    assert_eq!(out, "echo 'a b' &");
}

#[test]
fn json_env_prefixed_group_fails_syntax_check() {
    let input = r#"{"name": "ls", "env": {"FOO": "x"}, "grouped": true}"#;
    assert_eq!(from_json(input).unwrap(), "FOO=x (ls)");

    let mut config = Config::default_config();
    config.settings.check_syntax = true;
    assert!(matches!(
        cmdchain::render_json(input, &config),
        Err(Error::Syntax(_))
    ));
}

#[test]
fn redirect_targets_are_not_quoted() {
    let out = new("echo")
        .with_argument("x")
        .redirect_to_file("$LOGFILE")
        .render()
        .unwrap();
    assert_eq!(out, "echo x > $LOGFILE");
}
