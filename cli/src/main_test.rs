mod tests {
    use crate::*;

    #[test]
    fn test_cli_args_default_scale() {
        let args = CliArgs::try_parse_from(["joinbench"]).expect("should parse");
        assert_eq!(args.scale, DEFAULT_SCALE);
    }

    #[test]
    fn test_cli_args_accepts_scale() {
        let args = CliArgs::try_parse_from(["joinbench", "250"]).expect("should parse");
        assert_eq!(args.scale, 250);
    }

    #[test]
    fn test_cli_args_rejects_non_integer() {
        let err = CliArgs::try_parse_from(["joinbench", "lots"]).unwrap_err();
        assert!(err.to_string().contains("invalid scale 'lots'"));
    }

    #[test]
    fn test_cli_args_rejects_extra_positional() {
        assert!(CliArgs::try_parse_from(["joinbench", "1", "2"]).is_err());
    }

    #[test]
    fn test_trace_setting() {
        assert_eq!(trace_setting(""), TraceSetting::Off);
        assert_eq!(trace_setting(" OFF "), TraceSetting::Off);
        assert_eq!(trace_setting("0"), TraceSetting::Off);
        assert_eq!(trace_setting("True"), TraceSetting::Default);
        assert_eq!(trace_setting("1"), TraceSetting::Default);
        assert_eq!(
            trace_setting(" joinbench_core=trace "),
            TraceSetting::Filter("joinbench_core=trace".to_string())
        );
    }
}
