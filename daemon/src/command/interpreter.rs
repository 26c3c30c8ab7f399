use super::pattern::CommandPattern;

/// Ordered table of command patterns.
///
/// Patterns are tried in registration order and, within a pattern, aliases in
/// listed order. The first template that matches the whole transcript wins, so
/// specific phrasings must be registered before general ones.
pub struct CommandInterpreter<C> {
    patterns: Vec<CommandPattern<C>>,
}

impl<C> CommandInterpreter<C> {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn register(&mut self, pattern: CommandPattern<C>) -> &mut Self {
        self.patterns.push(pattern);
        self
    }

    pub fn register_all<I>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = CommandPattern<C>>,
    {
        self.patterns.extend(patterns);
        self
    }

    pub fn patterns(&self) -> &[CommandPattern<C>] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Index of the winning pattern and its captures, without running the action.
    pub fn find(&self, transcript: &str) -> Option<(usize, Vec<String>)> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(index, pattern)| pattern.captures(transcript).map(|c| (index, c)))
    }

    /// Run the action of the first matching pattern.
    ///
    /// Returns `false` when nothing matched; in that case no action runs and
    /// nothing is reported.
    pub fn interpret(&self, ctx: &mut C, transcript: &str) -> bool {
        match self.find(transcript) {
            Some((index, captures)) => {
                tracing::debug!(
                    "Transcript '{}' matched pattern #{} with captures {:?}",
                    transcript.trim(),
                    index,
                    captures
                );
                self.patterns[index].invoke(ctx, &captures);
                true
            }
            None => {
                tracing::debug!("No command matched transcript '{}'", transcript.trim());
                false
            }
        }
    }
}

impl<C> Default for CommandInterpreter<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Calls = Vec<(&'static str, Vec<String>)>;

    fn recorder(name: &'static str) -> impl Fn(&mut Calls, &[String]) + Send + Sync {
        move |calls: &mut Calls, args: &[String]| calls.push((name, args.to_vec()))
    }

    fn quiz_interpreter() -> CommandInterpreter<Calls> {
        let mut interpreter = CommandInterpreter::new();
        interpreter
            .register(
                CommandPattern::new(
                    ["generate a * question quiz about * with *"],
                    recorder("detailed"),
                )
                .unwrap(),
            )
            .register(CommandPattern::new(["generate quiz about *"], recorder("topic")).unwrap())
            .register(
                CommandPattern::new(
                    ["generate quiz", "create quiz", "start quiz"],
                    recorder("plain"),
                )
                .unwrap(),
            )
            .register(CommandPattern::new(["set topic to *"], recorder("set-topic")).unwrap());
        interpreter
    }

    #[test]
    fn test_interpret_three_wildcards() {
        let interpreter = quiz_interpreter();
        let mut calls = Calls::new();

        assert!(interpreter.interpret(
            &mut calls,
            "generate a 5 question quiz about history with multiple choice"
        ));
        assert_eq!(
            calls,
            vec![(
                "detailed",
                vec![
                    "5".to_string(),
                    "history".to_string(),
                    "multiple choice".to_string()
                ]
            )]
        );
    }

    #[test]
    fn test_registration_order_decides_winner() {
        let mut general_first = CommandInterpreter::new();
        general_first
            .register(CommandPattern::new(["generate *"], recorder("general")).unwrap())
            .register(CommandPattern::new(["generate quiz about *"], recorder("topic")).unwrap());

        let mut calls = Calls::new();
        assert!(general_first.interpret(&mut calls, "generate quiz about volcanoes"));
        assert_eq!(calls[0].0, "general");
        assert_eq!(calls[0].1, vec!["quiz about volcanoes".to_string()]);

        let mut specific_first = CommandInterpreter::new();
        specific_first
            .register(CommandPattern::new(["generate quiz about *"], recorder("topic")).unwrap())
            .register(CommandPattern::new(["generate *"], recorder("general")).unwrap());

        let mut calls = Calls::new();
        assert!(specific_first.interpret(&mut calls, "generate quiz about volcanoes"));
        assert_eq!(calls, vec![("topic", vec!["volcanoes".to_string()])]);
    }

    #[test]
    fn test_alias_triggers_same_action() {
        let interpreter = quiz_interpreter();
        let mut calls = Calls::new();

        for phrase in ["generate quiz", "Create Quiz", "start quiz"] {
            assert!(interpreter.interpret(&mut calls, phrase));
        }
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(name, args)| *name == "plain" && args.is_empty()));
    }

    #[test]
    fn test_case_insensitive_match() {
        let interpreter = quiz_interpreter();
        let mut calls = Calls::new();

        assert!(interpreter.interpret(&mut calls, "SET TOPIC TO Rome"));
        assert!(interpreter.interpret(&mut calls, "set topic to Rome"));
        assert_eq!(calls[0], ("set-topic", vec!["Rome".to_string()]));
        assert_eq!(calls[0], calls[1]);
    }

    #[test]
    fn test_interpret_is_idempotent() {
        let interpreter = quiz_interpreter();
        let mut calls = Calls::new();

        assert!(interpreter.interpret(&mut calls, "generate quiz about the moon"));
        assert!(interpreter.interpret(&mut calls, "generate quiz about the moon"));
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[test]
    fn test_no_match_runs_nothing() {
        let interpreter = quiz_interpreter();
        let mut calls = Calls::new();

        assert!(!interpreter.interpret(&mut calls, "what time is it"));
        assert!(!interpreter.interpret(&mut calls, ""));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_find_reports_index() {
        let interpreter = quiz_interpreter();
        assert_eq!(
            interpreter.find("generate quiz about cells"),
            Some((1, vec!["cells".to_string()]))
        );
        assert_eq!(interpreter.find("start quiz"), Some((2, vec![])));
        assert_eq!(interpreter.find("stop quiz"), None);
    }

    #[test]
    fn test_register_all_and_len() {
        let mut interpreter = CommandInterpreter::<Calls>::default();
        assert!(interpreter.is_empty());
        interpreter.register_all(vec![
            CommandPattern::new(["one"], recorder("one")).unwrap(),
            CommandPattern::new(["two *"], recorder("two")).unwrap(),
        ]);
        assert_eq!(interpreter.len(), 2);
        assert_eq!(interpreter.patterns()[1].arity(), 1);
    }
}
