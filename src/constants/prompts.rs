pub const QUIZ_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates English quiz questions for Qudurat exam preparation. {difficulty_note} Return ONLY raw JSON.";

pub const LESSON_SYSTEM_PROMPT: &str = "You are an expert English teacher preparing students for the Qudurat exam. Return ONLY raw JSON.";

pub const HIGH_SCHOOL_NOTE: &str = "Use vocabulary and concepts appropriate for high school students (grades 9-12). Keep language accessible and straightforward.";

pub const COLLEGE_NOTE: &str = "Use vocabulary and concepts suitable for undergraduate college students. Include moderately complex relationships and academic terminology.";

pub const ACADEMIC_NOTE: &str = "Use advanced academic vocabulary and sophisticated concepts. Include nuanced distinctions, complex relationships, and graduate-level reasoning.";

pub const ODD_ONE_OUT_TASK: &str = "For each question, provide 4 words where 3 share a category and 1 is logically different.
Question fields:
- id: string
- type: \"Odd One Out\"
- question_text: \"Choose the word that does not belong.\"
- options: array of 4 strings
- correct_answer: string (the odd word, copied exactly from options)
- explanation: string (why it is different)";

pub const ANALOGY_TASK: &str = "For each question, provide a base pair (A : B) and 4 option pairs. Exactly one option pair has the same relationship as the base pair.
Question fields:
- id: string
- type: \"Analogy\"
- question_text: \"Choose the pair that has a similar relationship to: [Base Pair]\"
- options: array of 4 strings formatted as \"Word1 : Word2\"
- correct_answer: string (the matching pair, copied exactly from options)
- explanation: string (the relationship shared by both pairs)";

pub const NON_LOGICAL_WORD_TASK: &str = "For each question, write a sentence in which exactly one word makes it illogical or breaks its meaning.
Question fields:
- id: string
- type: \"Non-Logical Word\"
- question_text: \"Identify the word that makes the sentence illogical.\"
- context: string (the full sentence including the illogical word)
- options: array of 4 words taken from the sentence, including the illogical one
- correct_answer: string (the illogical word, copied exactly from options)
- explanation: string (why it does not fit)";

pub const PARAGRAPH_MEANING_TASK: &str = "For each question, write a short paragraph (2-4 sentences) and 4 possible meanings or summaries.
Question fields:
- id: string
- type: \"Paragraph Meaning\"
- question_text: \"Read the paragraph and choose the best summary or meaning.\"
- context: string (the paragraph text)
- options: array of 4 strings
- correct_answer: string (the best summary, copied exactly from options)
- explanation: string (why it is the best summary)";

pub const ODD_ONE_OUT_LESSON: &str = "- explanation: string (3-4 paragraphs on categories, shared features and classification)
- common_tricks: array of 3-5 strings (tricks commonly used in exams)
- examples: array of 5 objects, each with:
  - question: string
  - options: array of 4 strings
  - correct_answer: string (copied exactly from options)
  - explanation: string (why this answer is correct)
- practice: array of 5 objects with the same fields as examples";

pub const ANALOGY_LESSON: &str = "- explanation: string (3-4 paragraphs teaching relationship types: part to whole, cause to effect, object to function, material to object, synonyms, opposites)
- common_tricks: array of 3-5 strings
- examples: array of 5 objects, each with:
  - base_pair: string (e.g. \"Hand : Glove\")
  - question: string
  - options: array of 4 strings formatted as \"Word1 : Word2\"
  - correct_answer: string (copied exactly from options)
  - explanation: string (the relationship type)
- practice: array of 5 objects with the same fields as examples";

pub const NON_LOGICAL_WORD_LESSON: &str = "- explanation: string (3-4 paragraphs on detecting contradictions, broken logic, wrong results and wrong verbs)
- common_tricks: array of 3-5 strings
- examples: array of 5 objects, each with:
  - sentence: string (a sentence containing one illogical word)
  - options: array of 4 words from the sentence
  - correct_answer: string (copied exactly from options)
  - explanation: string (why this word breaks the logic)
- practice: array of 5 objects with the same fields as examples";

pub const PARAGRAPH_MEANING_LESSON: &str = "- explanation: string (3-4 paragraphs on finding the main idea, ignoring details and avoiding distractor options)
- common_tricks: array of 3-5 strings
- examples: array of 5 objects, each with:
  - paragraph: string (2-4 sentences)
  - question: string
  - options: array of 4 possible meanings
  - correct_answer: string (copied exactly from options)
  - explanation: string (why this is the main idea)
- practice: array of 5 objects with the same fields as examples";
