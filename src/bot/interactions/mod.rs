pub mod shift_buttons;
