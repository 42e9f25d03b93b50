mod builders;

pub use builders::AnswerBuilder;
