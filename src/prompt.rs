//! ChatML-style prompt formatting

pub const TURN_START: &str = "<|im_start|>";
/// Marks the end of a turn. Sent as the stop sequence and
/// stripped from the decoded output if it leaks through.
pub const END_OF_TURN: &str = "<|im_end|>";

fn role_block(role: &str, content: &str) -> String
{   format!("{}{}\n{}{}\n", TURN_START, role, content, END_OF_TURN)
}

/// Build the prompt: optional system block, the user block,
/// then an open assistant turn for the model to complete.
/// An empty system prompt counts as absent.
pub fn format_prompt(
  user_input: &str
, system_prompt: Option<&str>
) -> String
{   let mut prompt = String::new();
    if let Some(system) = system_prompt.filter(|s| !s.is_empty())
    {   prompt.push_str(&role_block("system", system));
    }
    prompt.push_str(&role_block("user", user_input));
    prompt.push_str(TURN_START);
    prompt.push_str("assistant\n");
    prompt
}

/// Trim the decoded text and drop one trailing end-of-turn marker
pub fn strip_end_of_turn(decoded: &str) -> String
{   let text = decoded.trim();
    match text.strip_suffix(END_OF_TURN)
    {   Some(rest) => rest.trim().to_string()
      , None => text.to_string()
    }
}
