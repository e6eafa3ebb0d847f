mod tests_lexer;
mod tests_mapping;
mod tests_recognizer;
