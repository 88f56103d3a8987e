// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Prompts sent to the chat model.

pub const SYSTEM_PROMPT: &str = "You are an assistant that returns clean, comma-separated lists of words or short phrases for text analysis tools. Your output must ONLY be the list, no intro, no explanation, no extra words.";

/// User message asking for terms related to `category`
pub fn user_prompt(category: &str) -> String {
    format!(
        "Generate a list of 10-20 related words and short casual phrases about \"{}\". \
         Use common, casual language. Return only a single line with words and phrases \
         separated by commas.",
        category
    )
}
