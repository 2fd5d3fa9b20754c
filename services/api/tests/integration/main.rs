mod helpers;

mod account_test;
