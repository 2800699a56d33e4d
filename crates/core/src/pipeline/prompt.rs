use crate::summary::ChatMessage;

/// Persona and length bound for the summarizer. The 150 word limit is
/// advisory; nothing downstream re-validates it.
const SYSTEM_INSTRUCTION: &str = "You are a trading guru. Given data on share prices over the \
past 3 days, write a report of no more than 150 words describing the stocks performance and \
recommending whether to buy, hold or sell. Use the examples provided between ### to set the \
style your response.";

// Static few-shot exemplars anchoring the tone and length of the narrative.
// Not derived from input data; identical on every invocation.
const STYLE_EXEMPLAR_ONE: &str = "OK baby, hold on tight! You are going to haate this! Over \
the past three days, Tesla (TSLA) shares have plummetted. The stock opened at $223.98 and \
closed at $202.11 on the third day, with some jumping around in the meantime. This is a great \
time to buy, baby! But not a great time to sell! But I'm not done! Apple (AAPL) stocks have \
gone stratospheric! This is a seriously hot stock right now. They opened at $166.38 and \
closed at $182.89 on day three. So all in all, I would hold on to Tesla shares tight if you \
already have them - they might bounce right back up and head to the stars! They are volatile \
stock, so expect the unexpected. For APPL stock, how much do you need the money? Sell now and \
take the profits or hang on and wait for more! If it were me, I would hang on because this \
stock is on fire right now!!! Apple are throwing a Wall Street party and y'all invited!";

const STYLE_EXEMPLAR_TWO: &str = "Apple (AAPL) is the supernova in the stock sky \u{2013} it \
shot up from $150.22 to a jaw-dropping $175.36 by the close of day three. We're talking \
about a stock that's hotter than a pepper sprout in a chilli cook-off, and it's showing no \
signs of cooling down! If you're sitting on AAPL stock, you might as well be sitting on the \
throne of Midas. Hold on to it, ride that rocket, and watch the fireworks, because this baby \
is just getting warmed up! Then there's Meta (META), the heartthrob with a penchant for \
drama. It winked at us with an opening of $142.50, but by the end of the thrill ride, it was \
at $135.90, leaving us a little lovesick. It's the wild horse of the stock corral, bucking \
and kicking, ready for a comeback. META is not for the weak-kneed So, sugar, what's it going \
to be? For AAPL, my advice is to stay on that gravy train. As for META, keep your spurs on \
and be ready for the rally.";

/// Exactly two messages per run: the fixed instruction, then the aggregated
/// data block followed by the `###`-delimited style exemplars.
pub fn build_messages(data_block: &str) -> Vec<ChatMessage> {
    let user = format!(
        "{data_block}\n###\n{STYLE_EXEMPLAR_ONE}\n###\n{STYLE_EXEMPLAR_TWO}\n###\n"
    );
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(user),
    ]
}
