mod lib;

mod groups;
mod report;
mod run;
