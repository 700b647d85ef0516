mod known_answers;
mod round_trip;
mod sender;
